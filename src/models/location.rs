use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationHints {
    pub districts: Vec<String>,
    pub areas: Vec<String>,
    // Always empty.
    pub localities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub country: String,
    pub country_code: String,
    pub continent: String,
    pub region: String,
    pub region_code: String,
    pub city: String,
    pub district: Option<String>,
    pub zip: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub currency: Option<String>,
    pub isp: String,
    pub org: String,
    #[serde(rename = "as")]
    pub as_name: String,
    pub asname: Option<String>,
    pub reverse: Option<String>,
    pub mobile: bool,
    pub proxy: bool,
    pub hosting: bool,
    pub location_hints: LocationHints,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExactLocation {
    Granted(Value),
    Denied(Value),
}

impl ExactLocation {
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        if object.get("denied").and_then(Value::as_bool) == Some(true) {
            return Some(ExactLocation::Denied(value.clone()));
        }

        let has_coordinates = object.get("latitude").is_some_and(Value::is_number)
            && object.get("longitude").is_some_and(Value::is_number);

        has_coordinates.then(|| ExactLocation::Granted(value.clone()))
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, ExactLocation::Denied(_))
    }

    pub fn into_value(self) -> Value {
        match self {
            ExactLocation::Granted(value) | ExactLocation::Denied(value) => value,
        }
    }
}
