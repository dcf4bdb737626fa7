use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::GeoError;
use crate::models::Location;
use crate::services::isp_hints::derive_location_hints;

const LOOKUP_FIELDS: &str = "status,message,continent,country,countryCode,region,regionName,city,district,zip,lat,lon,timezone,currency,isp,org,as,asname,reverse,mobile,proxy,hosting,query";

#[async_trait]
pub trait GeoLocator: Send + Sync {
    async fn locate(&self, ip: Option<&str>) -> Option<Location>;
}

// Prefix tests only, so e.g. `172.32.0.1` is skipped as well.
pub fn is_local_address(ip: &str) -> bool {
    ip == "::1"
        || ip == "127.0.0.1"
        || ip.starts_with("192.168.")
        || ip.starts_with("10.")
        || ip.starts_with("172.")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    #[serde(default)]
    continent: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    country_code: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    region_name: String,
    #[serde(default)]
    city: String,
    district: Option<String>,
    #[serde(default)]
    zip: String,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
    #[serde(default)]
    timezone: String,
    currency: Option<String>,
    #[serde(default)]
    isp: String,
    #[serde(default)]
    org: String,
    #[serde(default, rename = "as")]
    as_name: String,
    asname: Option<String>,
    reverse: Option<String>,
    #[serde(default)]
    mobile: bool,
    #[serde(default)]
    proxy: bool,
    #[serde(default)]
    hosting: bool,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<IpApiResponse> for Location {
    fn from(geo: IpApiResponse) -> Self {
        let location_hints = derive_location_hints(&geo.isp, &geo.org, &geo.city);

        Self {
            country: geo.country,
            country_code: geo.country_code,
            continent: geo.continent,
            region: geo.region_name,
            region_code: geo.region,
            city: geo.city,
            district: non_empty(geo.district),
            zip: geo.zip,
            latitude: geo.lat,
            longitude: geo.lon,
            timezone: geo.timezone,
            currency: non_empty(geo.currency),
            isp: geo.isp,
            org: geo.org,
            as_name: geo.as_name,
            asname: non_empty(geo.asname),
            reverse: non_empty(geo.reverse),
            mobile: geo.mobile,
            proxy: geo.proxy,
            hosting: geo.hosting,
            location_hints,
        }
    }
}

#[derive(Clone)]
pub struct IpApiClient {
    client: Client,
    base_url: String,
}

impl IpApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn lookup(&self, ip: &str) -> Result<Location, GeoError> {
        let url = format!("{}/{}", self.base_url, ip);

        let response = self
            .client
            .get(&url)
            .query(&[("fields", LOOKUP_FIELDS)])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(GeoError::Status(response.status()));
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(GeoError::EmptyBody);
        }

        let geo: IpApiResponse = serde_json::from_slice(&body)?;
        if geo.status != "success" {
            return Err(GeoError::Failed(geo.message));
        }

        Ok(geo.into())
    }
}

#[async_trait]
impl GeoLocator for IpApiClient {
    async fn locate(&self, ip: Option<&str>) -> Option<Location> {
        let ip = ip.filter(|ip| !ip.is_empty() && !is_local_address(ip))?;

        match self.lookup(ip).await {
            Ok(location) => {
                debug!(
                    "Resolved {} to {}, {}, {}",
                    ip, location.city, location.region, location.country
                );
                Some(location)
            }
            Err(err) => {
                warn!("Geolocation for {} unavailable: {}", ip, err);
                None
            }
        }
    }
}
