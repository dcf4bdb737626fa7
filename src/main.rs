use beacon_log::api::{self, AppState};
use beacon_log::config::Config;
use beacon_log::repositories::JsonFileStore;
use beacon_log::services::IpApiClient;

use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beacon_log=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting beacon-log v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();

    let store = JsonFileStore::open(&config.log_file).await?;
    info!("Event log at {}", store.path().display());

    let download_name = config
        .log_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "visitor_data.json".to_string());

    let geo = IpApiClient::new(config.geo_api_url.clone(), config.geo_timeout)?;

    let state = AppState {
        store: Arc::new(store),
        geo: Arc::new(geo),
        static_dir: config.static_dir.clone(),
        download_name,
    };

    let app = api::build_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    info!("Starting server on {}", addr);
    info!("Admin panel at http://{}/admin", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
