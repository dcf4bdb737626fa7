use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub type Payload = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Visitor,
    Action,
    Interaction,
    Visibility,
    Scroll,
    Mouse,
    Keyboard,
    Unload,
    LocationUpdate,
    // Written by something else; kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::Visitor => "visitor",
            EventType::Action => "action",
            EventType::Interaction => "interaction",
            EventType::Visibility => "visibility",
            EventType::Scroll => "scroll",
            EventType::Mouse => "mouse",
            EventType::Keyboard => "keyboard",
            EventType::Unload => "unload",
            EventType::LocationUpdate => "location_update",
            EventType::Other(name) => name,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "type")]
    pub event_type: EventType,

    pub data: Value,
}

impl EventRecord {
    pub fn new(event_type: EventType, data: Payload) -> Self {
        Self {
            event_type,
            data: Value::Object(data),
        }
    }

    pub fn payload_mut(&mut self) -> Option<&mut Payload> {
        self.data.as_object_mut()
    }

    pub fn ip(&self) -> Option<&str> {
        self.data.get("ip").and_then(Value::as_str)
    }

    pub fn is_visitor_from(&self, ip: &str) -> bool {
        self.event_type == EventType::Visitor && self.ip() == Some(ip)
    }

    pub fn field(&self, name: &str) -> Option<Value> {
        self.data.get(name).cloned()
    }
}

pub fn latest_visitor_index(records: &[EventRecord], ip: &str) -> Option<usize> {
    records.iter().rposition(|record| record.is_visitor_from(ip))
}

pub fn server_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
