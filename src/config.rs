use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_file: PathBuf,
    pub static_dir: PathBuf,
    pub geo_api_url: String,
    pub geo_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_file: PathBuf::from("visitor_data.json"),
            static_dir: PathBuf::from("public"),
            geo_api_url: "http://ip-api.com/json".to_string(),
            geo_timeout: Duration::from_secs(5),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT").unwrap_or(defaults.port),
            log_file: std::env::var("LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
            static_dir: std::env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            geo_api_url: std::env::var("GEO_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.geo_api_url),
            geo_timeout: parse_var("GEO_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.geo_timeout),
        };

        debug!("Loaded configuration: {:?}", config);
        config
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid {}={:?}, using default", name, raw);
            None
        }
    }
}
