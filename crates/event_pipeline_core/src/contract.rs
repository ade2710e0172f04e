use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const RECORD_TYPE_DEFAULT: &str = "default";
pub const RECORD_TYPE_TRANSFORMED: &str = "transformed";
pub const RECORD_TYPE_FILE_PROCESSED: &str = "file_processed";
pub const RECORD_TYPE_WORKFLOW: &str = "workflow";

/// Upper bound on records returned by a single listing scan.
pub const LIST_EVENTS_LIMIT: usize = 100;

pub const EVENT_CREATED_MESSAGE: &str = "Event created successfully";
pub const NOT_FOUND_MESSAGE: &str = "Not found";
pub const DEFAULT_NOTIFICATION_MESSAGE: &str = "Default notification";
pub const DEFAULT_NOTIFICATION_SUBJECT: &str = "Notification";
pub const UNKNOWN_CONTENT_TYPE: &str = "unknown";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Pending,
    Processed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompletionStatus {
    Completed,
}

/// The single persisted entity. Every handler that writes to the table
/// produces one of these; only the event finalizer ever mutates one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default = "empty_object")]
    pub data: Value,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<i64>,
}

impl Record {
    pub fn new(
        id: impl Into<String>,
        record_type: impl Into<String>,
        data: Value,
        timestamp: i64,
    ) -> Self {
        Self {
            id: id.into(),
            record_type: record_type.into(),
            data,
            timestamp,
            status: None,
            processed_at: None,
        }
    }

    /// A freshly ingested event waiting for the finalizer.
    pub fn pending_event(
        id: impl Into<String>,
        record_type: impl Into<String>,
        data: Value,
        timestamp: i64,
    ) -> Self {
        Self {
            status: Some(EventStatus::Pending),
            ..Self::new(id, record_type, data, timestamp)
        }
    }

    pub fn mark_processed(&mut self, processed_at: i64) {
        self.status = Some(EventStatus::Processed);
        self.processed_at = Some(processed_at);
    }
}

pub fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Body of a create request after defaults have been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateEventRequest {
    pub event_type: String,
    pub data: Value,
}

impl CreateEventRequest {
    /// Applies the create defaults to an already-decoded body. Anything that
    /// is not a JSON object is treated as an empty body.
    pub fn from_body(body: &Value) -> Self {
        let event_type = body
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or(RECORD_TYPE_DEFAULT)
            .to_string();
        let data = body
            .get("data")
            .filter(|value| !value.is_null())
            .cloned()
            .unwrap_or_else(empty_object);

        Self { event_type, data }
    }
}

/// Message placed on the queue for the finalizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueuedEvent {
    pub event_id: String,
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default = "empty_object")]
    pub data: Value,
}

impl From<&Record> for QueuedEvent {
    fn from(record: &Record) -> Self {
        Self {
            event_id: record.id.clone(),
            event_type: record.record_type.clone(),
            data: record.data.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventCreatedResponse {
    pub id: String,
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventListResponse {
    pub events: Vec<Record>,
    pub count: usize,
}

impl From<Vec<Record>> for EventListResponse {
    fn from(events: Vec<Record>) -> Self {
        Self {
            count: events.len(),
            events,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

/// Processed-versus-delivered counts returned by the batch handlers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectMetadata {
    pub size: i64,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileRecordData {
    pub bucket: String,
    pub key: String,
    pub size: i64,
    pub content_type: String,
}

impl FileRecordData {
    pub fn new(
        bucket: impl Into<String>,
        key: impl Into<String>,
        metadata: ObjectMetadata,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            size: metadata.size,
            content_type: metadata
                .content_type
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| UNKNOWN_CONTENT_TYPE.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TransformRequest {
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DerivedView {
    pub uppercase_keys: Map<String, Value>,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransformedView {
    pub original: Map<String, Value>,
    pub transformed: DerivedView,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransformResponse {
    pub success: bool,
    pub transformed: TransformedView,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NotificationRequest {
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub subject: Option<String>,
}

impl NotificationRequest {
    pub fn message_text(&self) -> String {
        match &self.message {
            None | Some(Value::Null) => DEFAULT_NOTIFICATION_MESSAGE.to_string(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn subject_text(&self) -> String {
        self.subject
            .clone()
            .unwrap_or_else(|| DEFAULT_NOTIFICATION_SUBJECT.to_string())
    }
}

/// JSON document published to the topic. `default` is the fallback body
/// delivered to every protocol subscribed to the topic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationEnvelope {
    pub default: String,
    pub subject: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationResponse {
    pub success: bool,
    pub message_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkflowRequest {
    #[serde(default)]
    pub workflow_id: Option<String>,
    #[serde(default)]
    pub steps: Vec<WorkflowStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowStep {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "empty_object")]
    pub data: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepResult {
    pub step: Option<String>,
    pub status: CompletionStatus,
    pub timestamp: i64,
}

/// `data` payload of a persisted workflow record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowSummary {
    pub steps: Vec<StepResult>,
    pub status: CompletionStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowResponse {
    pub workflow_id: String,
    pub steps: Vec<StepResult>,
    pub status: CompletionStatus,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn pending_event_serializes_status_but_not_processed_at() {
        let record = Record::pending_event("evt_1", "default", json!({}), 10);
        let value = serde_json::to_value(&record).expect("record should serialize");

        assert_eq!(value["type"], "default");
        assert_eq!(value["status"], "pending");
        assert!(value.get("processed_at").is_none());
    }

    #[test]
    fn non_event_record_omits_status_fields() {
        let record = Record::new("wf_1", RECORD_TYPE_WORKFLOW, json!({"status": "completed"}), 10);
        let value = serde_json::to_value(&record).expect("record should serialize");

        assert!(value.get("status").is_none());
        assert!(value.get("processed_at").is_none());
    }

    #[test]
    fn mark_processed_sets_both_fields() {
        let mut record = Record::pending_event("evt_1", "default", json!({}), 10);
        record.mark_processed(20);

        assert_eq!(record.status, Some(EventStatus::Processed));
        assert_eq!(record.processed_at, Some(20));
    }

    #[test]
    fn create_request_defaults_apply_to_empty_and_non_object_bodies() {
        for body in [json!({}), json!([1, 2]), json!("text"), Value::Null] {
            let request = CreateEventRequest::from_body(&body);
            assert_eq!(request.event_type, RECORD_TYPE_DEFAULT);
            assert_eq!(request.data, json!({}));
        }
    }

    #[test]
    fn create_request_keeps_supplied_values() {
        let request =
            CreateEventRequest::from_body(&json!({"type": "signup", "data": {"user": 7}}));
        assert_eq!(request.event_type, "signup");
        assert_eq!(request.data, json!({"user": 7}));
    }

    #[test]
    fn non_string_type_falls_back_to_default() {
        for kind in [json!(5), json!(true), json!({"name": "signup"}), Value::Null] {
            let request = CreateEventRequest::from_body(&json!({"type": kind, "data": {"a": 1}}));
            assert_eq!(request.event_type, RECORD_TYPE_DEFAULT);
            assert_eq!(request.data, json!({"a": 1}));
        }
    }

    #[test]
    fn queued_event_requires_event_id() {
        let error = serde_json::from_str::<QueuedEvent>(r#"{"type":"default"}"#)
            .expect_err("event_id is required");
        assert!(error.to_string().contains("event_id"));
    }

    #[test]
    fn file_record_defaults_missing_content_type() {
        let data = FileRecordData::new(
            "uploads",
            "a.bin",
            ObjectMetadata {
                size: 3,
                content_type: None,
            },
        );
        assert_eq!(data.content_type, UNKNOWN_CONTENT_TYPE);
    }

    #[test]
    fn notification_defaults_and_stringifies_message() {
        let empty = NotificationRequest::default();
        assert_eq!(empty.message_text(), DEFAULT_NOTIFICATION_MESSAGE);
        assert_eq!(empty.subject_text(), DEFAULT_NOTIFICATION_SUBJECT);

        let numeric = NotificationRequest {
            message: Some(json!(42)),
            subject: Some("Alert".to_string()),
        };
        assert_eq!(numeric.message_text(), "42");
        assert_eq!(numeric.subject_text(), "Alert");
    }
}
