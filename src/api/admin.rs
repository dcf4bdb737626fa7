use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
    Json,
};
use tracing::{error, info};

use super::response::ApiError;
use super::AppState;
use crate::models::{EventRecord, Summary};

pub async fn summary(State(state): State<AppState>) -> Result<Json<Summary>, ApiError> {
    let records = state.store.read_all().await?;
    Ok(Json(Summary::from_records(&records)))
}

pub async fn raw(State(state): State<AppState>) -> Result<Json<Vec<EventRecord>>, ApiError> {
    Ok(Json(state.store.read_all().await?))
}

pub async fn download(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let bytes = state.store.export().await.map_err(|err| {
        if err.is_not_found() {
            ApiError::not_found("Data file not found")
        } else {
            error!("Failed to export event log: {}", err);
            ApiError::internal("Failed to read data")
        }
    })?;

    info!("Event log downloaded ({} bytes)", bytes.len());

    Ok((
        [
            (CONTENT_TYPE, "application/json".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", state.download_name),
            ),
        ],
        bytes,
    ))
}
