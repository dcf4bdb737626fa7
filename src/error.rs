use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("event log I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("event log is not a valid record array: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Io(err) if err.kind() == std::io::ErrorKind::NotFound)
    }
}

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("service returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("service returned an empty body")]
    EmptyBody,

    #[error("could not parse service response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("service reported failure: {}", .0.as_deref().unwrap_or("no message"))]
    Failed(Option<String>),
}
