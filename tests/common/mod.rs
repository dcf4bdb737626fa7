#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use beacon_log::api::{build_router, AppState};
use beacon_log::error::StoreError;
use beacon_log::models::{EventRecord, Location, LocationHints};
use beacon_log::repositories::{EventStore, JsonFileStore, VisitorPatch};
use beacon_log::services::GeoLocator;

/// Geolocation stand-in that answers every lookup with the same result.
pub struct StubGeo {
    location: Option<Location>,
    calls: AtomicUsize,
}

impl StubGeo {
    pub fn found() -> Arc<Self> {
        Arc::new(Self {
            location: Some(sample_location()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            location: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeoLocator for StubGeo {
    async fn locate(&self, ip: Option<&str>) -> Option<Location> {
        ip?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.location.clone()
    }
}

/// Store whose writes and reads always fail.
pub struct BrokenStore;

fn broken() -> StoreError {
    StoreError::Io(std::io::Error::other("disk unavailable"))
}

#[async_trait]
impl EventStore for BrokenStore {
    async fn append(&self, _record: EventRecord) -> Result<(), StoreError> {
        Err(broken())
    }

    async fn read_all(&self) -> Result<Vec<EventRecord>, StoreError> {
        Err(broken())
    }

    async fn amend_latest_visitor_by_ip(
        &self,
        _ip: &str,
        _patch: VisitorPatch,
    ) -> Result<bool, StoreError> {
        Err(broken())
    }

    async fn export(&self) -> Result<Vec<u8>, StoreError> {
        Err(broken())
    }
}

pub fn sample_location() -> Location {
    Location {
        country: "India".to_string(),
        country_code: "IN".to_string(),
        continent: "Asia".to_string(),
        region: "Maharashtra".to_string(),
        region_code: "MH".to_string(),
        city: "Mumbai".to_string(),
        district: None,
        zip: "400001".to_string(),
        latitude: 18.94,
        longitude: 72.83,
        timezone: "Asia/Kolkata".to_string(),
        currency: Some("INR".to_string()),
        isp: "Mumbai Broadband 400001".to_string(),
        org: String::new(),
        as_name: "AS9829 Example".to_string(),
        asname: None,
        reverse: None,
        mobile: false,
        proxy: false,
        hosting: false,
        location_hints: LocationHints {
            districts: vec!["mumbai".to_string()],
            areas: vec!["400001".to_string()],
            localities: Vec::new(),
        },
    }
}

pub struct TestApp {
    pub dir: tempfile::TempDir,
    pub store: Arc<JsonFileStore>,
    pub router: axum::Router,
}

impl TestApp {
    pub fn log_path(&self) -> PathBuf {
        self.dir.path().join("visitor_data.json")
    }

    pub fn static_dir(&self) -> PathBuf {
        self.dir.path().join("public")
    }
}

pub async fn setup(geo: Arc<dyn GeoLocator>) -> TestApp {
    let dir = tempfile::tempdir().expect("tempdir");
    let static_dir = dir.path().join("public");
    std::fs::create_dir_all(&static_dir).expect("static dir");

    let store = Arc::new(
        JsonFileStore::open(dir.path().join("visitor_data.json"))
            .await
            .expect("open store"),
    );

    let state = AppState {
        store: store.clone(),
        geo,
        static_dir,
        download_name: "visitor_data.json".to_string(),
    };

    TestApp {
        dir,
        store,
        router: build_router(state),
    }
}

pub fn router_with_store(store: Arc<dyn EventStore>, geo: Arc<dyn GeoLocator>) -> axum::Router {
    build_router(AppState {
        store,
        geo,
        static_dir: PathBuf::from("/nonexistent/static"),
        download_name: "visitor_data.json".to_string(),
    })
}

pub fn beacon(uri: &str, ip: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-forwarded-for", ip)
        .header("user-agent", "TestAgent/1.0")
        .body(Body::from(body.to_string()))
        .expect("build beacon request")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build get request")
}

pub async fn body_bytes(resp: Response<Body>) -> Vec<u8> {
    resp.into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes()
        .to_vec()
}

pub async fn json_body(resp: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(resp).await).unwrap_or(Value::Null)
}
