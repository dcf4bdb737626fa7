pub mod admin;
pub mod extract;
pub mod ingest;
pub mod pages;
pub mod response;

use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::repositories::EventStore;
use crate::services::GeoLocator;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EventStore>,
    pub geo: Arc<dyn GeoLocator>,
    pub static_dir: PathBuf,
    pub download_name: String,
}

pub fn build_router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(pages::landing_page))
        .route("/admin", get(pages::admin_page))
        .route("/admin/api", get(admin::summary))
        .route("/download", get(admin::download))
        .route("/raw", get(admin::raw))
        .route("/log-visitor", post(ingest::log_visitor))
        .route("/log-visitor-location", post(ingest::log_visitor_location))
        .route("/log-action", post(ingest::log_action))
        .route("/log-interaction", post(ingest::log_interaction))
        .route("/log-visibility", post(ingest::log_visibility))
        .route("/log-scroll", post(ingest::log_scroll))
        .route("/log-mouse", post(ingest::log_mouse))
        .route("/log-keyboard", post(ingest::log_keyboard))
        .route("/log-unload", post(ingest::log_unload))
        .fallback_service(assets)
        .with_state(state)
}
