use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use serde_json::{json, Map, Value};
use tracing::{debug, error, info, warn};

use super::extract::ClientIp;
use super::AppState;
use crate::models::event::{latest_visitor_index, server_timestamp};
use crate::models::{EventRecord, EventType, ExactLocation, Payload};
use crate::repositories::VisitorPatch;

// Content type is ignored: sendBeacon posts text/plain.
pub fn parse_payload(body: &[u8]) -> Payload {
    if body.is_empty() {
        return Payload::new();
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            debug!("Ignoring non-object beacon body: {}", other);
            Payload::new()
        }
        Err(err) => {
            debug!("Ignoring unparsable beacon body: {}", err);
            Payload::new()
        }
    }
}

pub fn headers_to_value(headers: &HeaderMap) -> Value {
    let mut map = Map::new();

    for (name, value) in headers.iter() {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        match map.get_mut(name.as_str()) {
            Some(Value::String(existing)) => {
                existing.push_str(", ");
                existing.push_str(&value);
            }
            _ => {
                map.insert(name.as_str().to_string(), Value::String(value));
            }
        }
    }

    Value::Object(map)
}

fn stamp(data: &mut Payload, ip: Option<&str>) {
    data.insert(
        "ip".to_string(),
        ip.map_or(Value::Null, |ip| Value::String(ip.to_string())),
    );
    data.insert("timestamp".to_string(), Value::String(server_timestamp()));
}

fn success() -> Json<Value> {
    Json(json!({ "status": "success" }))
}

async fn persist(state: &AppState, record: EventRecord) {
    let event_type = record.event_type.clone();
    if let Err(err) = state.store.append(record).await {
        error!("Failed to log {} event: {}", event_type, err);
    }
}

async fn log_simple(
    state: AppState,
    event_type: EventType,
    ip: Option<String>,
    body: Bytes,
) -> Json<Value> {
    let mut data = parse_payload(&body);
    stamp(&mut data, ip.as_deref());

    if event_type == EventType::Action {
        let action = data.get("action").unwrap_or(&Value::Null);
        info!(
            "User action from {}: {}",
            ip.as_deref().unwrap_or("unknown"),
            action
        );
    }

    persist(&state, EventRecord::new(event_type, data)).await;
    success()
}

#[axum::debug_handler]
pub async fn log_visitor(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    let mut data = parse_payload(&body);
    stamp(&mut data, ip.as_deref());
    data.insert("headers".to_string(), headers_to_value(&headers));

    if let Some(location) = state.geo.locate(ip.as_deref()).await {
        info!(
            "Visitor {} located in {}, {}, {} ({}, {}) via {}",
            ip.as_deref().unwrap_or("unknown"),
            location.city,
            location.region,
            location.country,
            location.latitude,
            location.longitude,
            location.isp
        );
        match serde_json::to_value(&location) {
            Ok(value) => {
                data.insert("location".to_string(), value);
            }
            Err(err) => warn!("Could not attach location: {}", err),
        }
    }

    let user_agent = data.get("userAgent").unwrap_or(&Value::Null);
    let device = data.get("deviceType").unwrap_or(&Value::Null);
    let browser = data.get("browserName").unwrap_or(&Value::Null);
    info!(
        "Visitor logged: ip={} user_agent={} device={} browser={}",
        ip.as_deref().unwrap_or("unknown"),
        user_agent,
        device,
        browser
    );

    persist(&state, EventRecord::new(EventType::Visitor, data)).await;
    success()
}

pub async fn log_visitor_location(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    body: Bytes,
) -> Json<Value> {
    let mut data = parse_payload(&body);

    let exact = data.get("exactLocation").and_then(ExactLocation::from_value);
    if let (Some(ip), Some(exact)) = (ip.as_deref(), exact) {
        amend_visitor(&state, ip, exact).await;
    }

    stamp(&mut data, ip.as_deref());
    persist(&state, EventRecord::new(EventType::LocationUpdate, data)).await;
    success()
}

async fn amend_visitor(state: &AppState, ip: &str, exact: ExactLocation) {
    let fallback = if exact.is_denied() && !visitor_has_location(state, ip).await {
        info!("GPS denied for {}, falling back to IP geolocation", ip);
        state
            .geo
            .locate(Some(ip))
            .await
            .and_then(|location| serde_json::to_value(location).ok())
    } else {
        None
    };

    let exact_value = exact.into_value();
    let patch: VisitorPatch = Box::new(move |data: &mut Payload| {
        data.insert("exactLocation".to_string(), exact_value);
        if let Some(location) = fallback {
            if data.get("location").map_or(true, Value::is_null) {
                data.insert("location".to_string(), location);
            }
        }
    });

    match state.store.amend_latest_visitor_by_ip(ip, patch).await {
        Ok(true) => info!("Updated exact location for visitor {}", ip),
        Ok(false) => debug!("No visitor record for {}, location kept as update only", ip),
        Err(err) => error!("Failed to amend visitor {}: {}", ip, err),
    }
}

// Missing records and read failures count as located, so no lookup runs.
async fn visitor_has_location(state: &AppState, ip: &str) -> bool {
    match state.store.read_all().await {
        Ok(records) => latest_visitor_index(&records, ip)
            .map(|index| {
                records[index]
                    .data
                    .get("location")
                    .is_some_and(|location| !location.is_null())
            })
            .unwrap_or(true),
        Err(err) => {
            warn!("Could not read event log for {}: {}", ip, err);
            true
        }
    }
}

pub async fn log_action(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    body: Bytes,
) -> Json<Value> {
    log_simple(state, EventType::Action, ip, body).await
}

pub async fn log_interaction(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    body: Bytes,
) -> Json<Value> {
    log_simple(state, EventType::Interaction, ip, body).await
}

pub async fn log_visibility(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    body: Bytes,
) -> Json<Value> {
    log_simple(state, EventType::Visibility, ip, body).await
}

pub async fn log_scroll(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    body: Bytes,
) -> Json<Value> {
    log_simple(state, EventType::Scroll, ip, body).await
}

pub async fn log_mouse(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    body: Bytes,
) -> Json<Value> {
    log_simple(state, EventType::Mouse, ip, body).await
}

pub async fn log_keyboard(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    body: Bytes,
) -> Json<Value> {
    log_simple(state, EventType::Keyboard, ip, body).await
}

pub async fn log_unload(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    body: Bytes,
) -> Json<Value> {
    log_simple(state, EventType::Unload, ip, body).await
}
