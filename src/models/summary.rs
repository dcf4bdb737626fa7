use serde::Serialize;
use serde_json::Value;

use super::event::{EventRecord, EventType};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_visitors: usize,
    pub total_actions: usize,
    pub total_interactions: usize,
    pub total_scrolls: usize,
    pub total_mouse_movements: usize,
    pub total_keyboard_events: usize,
    pub total_visibility_changes: usize,
    pub total_unloads: usize,
    pub total_location_updates: usize,
    pub visitors: Vec<VisitorView>,
    pub actions: Vec<ActionView>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact_location: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_version: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_width: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_height: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_mobile: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_tablet: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_desktop: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_concurrency: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_touch_points: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webgl: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas_fingerprint: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Value>,
}

impl From<&EventRecord> for VisitorView {
    fn from(record: &EventRecord) -> Self {
        Self {
            timestamp: record.field("timestamp"),
            ip: record.field("ip"),
            location: record.field("location"),
            exact_location: record.field("exactLocation"),
            user_agent: record.field("userAgent"),
            device_type: record.field("deviceType"),
            os_name: record.field("osName"),
            browser_name: record.field("browserName"),
            browser_version: record.field("browserVersion"),
            screen_width: record.field("screenWidth"),
            screen_height: record.field("screenHeight"),
            is_mobile: record.field("isMobile"),
            is_tablet: record.field("isTablet"),
            is_desktop: record.field("isDesktop"),
            language: record.field("language"),
            timezone: record.field("timezone"),
            referrer: record.field("referrer"),
            hardware_concurrency: record.field("hardwareConcurrency"),
            max_touch_points: record.field("maxTouchPoints"),
            webgl: record.field("webgl"),
            canvas_fingerprint: record.field("canvasFingerprint"),
            plugins: record.field("plugins"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<Value>,
}

impl From<&EventRecord> for ActionView {
    fn from(record: &EventRecord) -> Self {
        Self {
            action: record.field("action"),
            timestamp: record.field("timestamp"),
            ip: record.field("ip"),
        }
    }
}

impl Summary {
    pub fn from_records(records: &[EventRecord]) -> Self {
        let count = |event_type: EventType| {
            records
                .iter()
                .filter(|record| record.event_type == event_type)
                .count()
        };

        Self {
            total_visitors: count(EventType::Visitor),
            total_actions: count(EventType::Action),
            total_interactions: count(EventType::Interaction),
            total_scrolls: count(EventType::Scroll),
            total_mouse_movements: count(EventType::Mouse),
            total_keyboard_events: count(EventType::Keyboard),
            total_visibility_changes: count(EventType::Visibility),
            total_unloads: count(EventType::Unload),
            total_location_updates: count(EventType::LocationUpdate),
            visitors: records
                .iter()
                .filter(|record| record.event_type == EventType::Visitor)
                .map(VisitorView::from)
                .collect(),
            actions: records
                .iter()
                .filter(|record| record.event_type == EventType::Action)
                .map(ActionView::from)
                .collect(),
        }
    }
}
