use event_pipeline_core::clock::Clock;
use event_pipeline_core::contract::{BatchSummary, QueuedEvent};
use serde::Deserialize;
use serde_json::Value;

use crate::adapters::record_store::RecordStore;
use crate::error::HandlerError;
use crate::handlers::response::{json_response, LambdaResponse};

/// Queue delivery. Bodies stay untyped so a malformed message only fails
/// when the loop reaches it.
#[derive(Debug, Clone, Deserialize)]
pub struct QueueBatch {
    #[serde(rename = "Records", default)]
    pub records: Vec<QueueMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueueMessage {
    #[serde(rename = "messageId", default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub body: Value,
}

/// Marks every referenced record processed, in delivery order. The first
/// failure is logged and returned, leaving later messages untouched for the
/// queue's redelivery policy.
pub fn handle_queue_batch(
    event: Value,
    store: &impl RecordStore,
    clock: &dyn Clock,
) -> Result<LambdaResponse, HandlerError> {
    let batch: QueueBatch = serde_json::from_value(event)?;
    let summary = finalize_batch(&batch, store, clock)?;
    Ok(json_response(200, summary))
}

pub fn finalize_batch(
    batch: &QueueBatch,
    store: &impl RecordStore,
    clock: &dyn Clock,
) -> Result<BatchSummary, HandlerError> {
    let total = batch.records.len();
    let mut processed = 0usize;

    for message in &batch.records {
        match finalize_message(message, store, clock) {
            Ok(event_id) => {
                tracing::debug!(
                    component = "event_processor",
                    event_id = %event_id,
                    "event marked processed"
                );
                processed += 1;
            }
            Err(error) => {
                tracing::error!(
                    component = "event_processor",
                    message_id = message.message_id.as_deref().unwrap_or("unknown"),
                    processed,
                    total,
                    error = %error,
                    "Error processing record"
                );
                return Err(error);
            }
        }
    }

    tracing::info!(component = "event_processor", processed, total, "batch finalized");
    Ok(BatchSummary { processed, total })
}

fn finalize_message(
    message: &QueueMessage,
    store: &impl RecordStore,
    clock: &dyn Clock,
) -> Result<String, HandlerError> {
    let body = message
        .body
        .as_str()
        .ok_or_else(|| HandlerError::invalid_payload("SQS record body must be a string"))?;
    let queued: QueuedEvent = serde_json::from_str(body)?;

    store
        .mark_processed(&queued.event_id, clock.now_secs())
        .map_err(HandlerError::Store)?;
    Ok(queued.event_id)
}

#[cfg(test)]
mod tests {
    use event_pipeline_core::clock::FixedClock;
    use event_pipeline_core::contract::{EventStatus, Record};
    use serde_json::json;

    use super::*;
    use crate::test_helpers::{InMemoryRecordStore, MISSING_RECORD_ERROR};

    fn clock() -> FixedClock {
        FixedClock::from_millis(1_771_057_900_000)
    }

    fn sqs_record(event_id: &str) -> Value {
        json!({
            "messageId": format!("m-{event_id}"),
            "eventSource": "aws:sqs",
            "body": json!({"event_id": event_id, "type": "default", "data": {}}).to_string(),
        })
    }

    fn seeded_store(ids: &[&str]) -> InMemoryRecordStore {
        let store = InMemoryRecordStore::new();
        for id in ids {
            store.seed(Record::pending_event(*id, "default", json!({}), 1));
        }
        store
    }

    #[test]
    fn marks_every_referenced_record_processed() {
        let store = seeded_store(&["evt_1", "evt_2", "evt_3"]);
        let event = json!({
            "Records": [sqs_record("evt_1"), sqs_record("evt_2"), sqs_record("evt_3")]
        });

        let response = handle_queue_batch(event, &store, &clock()).expect("batch should succeed");

        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.body_json().expect("body should be json"),
            json!({"processed": 3, "total": 3})
        );
        for record in store.records() {
            assert_eq!(record.status, Some(EventStatus::Processed));
            assert_eq!(record.processed_at, Some(1_771_057_900));
        }
    }

    #[test]
    fn stops_at_first_missing_record() {
        let store = seeded_store(&["evt_1", "evt_3"]);
        let event = json!({
            "Records": [sqs_record("evt_1"), sqs_record("evt_missing"), sqs_record("evt_3")]
        });

        let error = handle_queue_batch(event, &store, &clock()).expect_err("batch should abort");

        assert_eq!(error.to_string(), MISSING_RECORD_ERROR);
        assert_eq!(
            store.get("evt_1").and_then(|record| record.status),
            Some(EventStatus::Processed)
        );
        let untouched = store.get("evt_3").expect("record should exist");
        assert_eq!(untouched.status, Some(EventStatus::Pending));
        assert_eq!(untouched.processed_at, None);
    }

    #[test]
    fn malformed_body_aborts_the_batch() {
        let store = seeded_store(&["evt_1"]);
        let event = json!({
            "Records": [
                {"messageId": "m-0", "body": "{\"type\":\"default\"}"},
                sqs_record("evt_1")
            ]
        });

        let error = handle_queue_batch(event, &store, &clock()).expect_err("batch should abort");
        assert!(error.to_string().contains("event_id"));
        assert_eq!(
            store.get("evt_1").and_then(|record| record.status),
            Some(EventStatus::Pending)
        );
    }

    #[test]
    fn non_string_body_is_rejected() {
        let store = seeded_store(&[]);
        let event = json!({"Records": [{"messageId": "m-0", "body": 42}]});

        let error = handle_queue_batch(event, &store, &clock()).expect_err("batch should abort");
        assert_eq!(error.to_string(), "SQS record body must be a string");
    }

    #[test]
    fn empty_delivery_reports_zero_of_zero() {
        let response = handle_queue_batch(json!({}), &seeded_store(&[]), &clock())
            .expect("empty batch should succeed");
        assert_eq!(
            response.body_json().expect("body should be json"),
            json!({"processed": 0, "total": 0})
        );
    }
}
