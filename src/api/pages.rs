use axum::{extract::State, response::Html};
use std::io::ErrorKind;
use std::path::Path;
use tracing::error;

use super::response::ApiError;
use super::AppState;

pub async fn landing_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    serve_page(&state.static_dir.join("index.html")).await
}

pub async fn admin_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    serve_page(&state.static_dir.join("admin.html")).await
}

async fn serve_page(path: &Path) -> Result<Html<String>, ApiError> {
    match tokio::fs::read_to_string(path).await {
        Ok(html) => Ok(Html(html)),
        Err(err) if err.kind() == ErrorKind::NotFound => Err(ApiError::not_found("Page not found")),
        Err(err) => {
            error!("Failed to read {}: {}", path.display(), err);
            Err(ApiError::internal("Failed to load page"))
        }
    }
}
