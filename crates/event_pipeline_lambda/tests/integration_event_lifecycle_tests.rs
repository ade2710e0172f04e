use std::collections::HashSet;

use event_pipeline_core::clock::{FixedClock, SystemClock};
use event_pipeline_core::contract::{EventStatus, RECORD_TYPE_FILE_PROCESSED};
use event_pipeline_core::ids::{matches_generated_pattern, IdPrefix};
use event_pipeline_lambda::handlers::api::handle_api_event;
use event_pipeline_lambda::handlers::event_processor::handle_queue_batch;
use event_pipeline_lambda::handlers::file_processor::handle_object_created_event;
use event_pipeline_lambda::test_helpers::{InMemoryBlobStore, InMemoryRecordStore, RecordingQueue};
use serde_json::{json, Value};

fn fixture(text: &str) -> Value {
    serde_json::from_str(text).expect("fixture should be valid json")
}

fn create_fixture() -> Value {
    fixture(include_str!("data/api_create_event.json"))
}

/// Wraps queued message bodies the way the queue delivers them.
fn delivery(bodies: &[String]) -> Value {
    let records: Vec<Value> = bodies
        .iter()
        .enumerate()
        .map(|(index, body)| {
            json!({
                "messageId": format!("message-{index}"),
                "eventSource": "aws:sqs",
                "body": body,
            })
        })
        .collect();
    json!({ "Records": records })
}

#[test]
fn created_event_is_listed_and_then_finalized_through_the_queue() {
    let store = InMemoryRecordStore::new();
    let queue = RecordingQueue::new();
    let clock = FixedClock::from_millis(1_771_057_800_000);

    let created = handle_api_event(&create_fixture(), &store, &queue, &clock);
    assert_eq!(created.status_code, 201);
    let created_id = created.body_json().expect("body should be json")["id"]
        .as_str()
        .expect("id should be a string")
        .to_string();

    let listed = handle_api_event(
        &fixture(include_str!("data/api_list_events.json")),
        &store,
        &queue,
        &clock,
    );
    assert_eq!(listed.status_code, 200);
    let listed_body = listed.body_json().expect("body should be json");
    assert_eq!(listed_body["count"], 1);
    assert_eq!(listed_body["events"][0]["id"], created_id.as_str());
    assert_eq!(listed_body["events"][0]["type"], "order_placed");
    assert_eq!(listed_body["events"][0]["data"]["order_id"], "o-991");
    assert_eq!(listed_body["events"][0]["status"], "pending");

    let finalize_clock = FixedClock::from_millis(1_771_057_860_000);
    let finalized = handle_queue_batch(delivery(&queue.messages()), &store, &finalize_clock)
        .expect("finalizer should succeed");
    assert_eq!(
        finalized.body_json().expect("body should be json"),
        json!({"processed": 1, "total": 1})
    );

    let record = store.get(&created_id).expect("record should exist");
    assert_eq!(record.status, Some(EventStatus::Processed));
    assert_eq!(record.processed_at, Some(1_771_057_860));
    assert_eq!(record.timestamp, 1_771_057_800);
}

#[test]
fn repeated_creates_yield_unique_event_ids() {
    let store = InMemoryRecordStore::new();
    let queue = RecordingQueue::new();

    let ids: Vec<String> = (0..25)
        .map(|_| {
            let response = handle_api_event(&create_fixture(), &store, &queue, &SystemClock);
            assert_eq!(response.status_code, 201);
            response.body_json().expect("body should be json")["id"]
                .as_str()
                .expect("id should be a string")
                .to_string()
        })
        .collect();

    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
    assert!(ids
        .iter()
        .all(|id| matches_generated_pattern(IdPrefix::Event, id)));
    assert_eq!(store.records().len(), ids.len());
    assert_eq!(queue.messages().len(), ids.len());
}

#[test]
fn finalizer_leaves_messages_after_a_missing_record_unapplied() {
    let store = InMemoryRecordStore::new();
    let queue = RecordingQueue::new();
    let clock = FixedClock::from_millis(1_771_057_800_000);

    for _ in 0..3 {
        handle_api_event(&create_fixture(), &store, &queue, &clock);
    }
    let mut bodies = queue.messages();
    bodies.insert(
        1,
        json!({"event_id": "evt_0", "type": "default", "data": {}}).to_string(),
    );

    handle_queue_batch(delivery(&bodies), &store, &clock).expect_err("batch should abort");

    let statuses: Vec<Option<EventStatus>> =
        store.records().iter().map(|record| record.status).collect();
    assert_eq!(
        statuses,
        vec![
            Some(EventStatus::Processed),
            Some(EventStatus::Pending),
            Some(EventStatus::Pending),
        ]
    );
}

#[test]
fn object_created_notification_records_file_metadata() {
    let blobs = InMemoryBlobStore::new().with_object(
        "pipeline-uploads",
        "incoming/invoice-0042.pdf",
        48_213,
        Some("application/pdf"),
    );
    let store = InMemoryRecordStore::new();

    let response = handle_object_created_event(
        &fixture(include_str!("data/s3_object_created.json")),
        &blobs,
        &store,
        &FixedClock::from_millis(1_771_057_800_000),
    );

    assert_eq!(response.status_code, 200);
    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].record_type, RECORD_TYPE_FILE_PROCESSED);
    assert_eq!(
        records[0].data,
        json!({
            "bucket": "pipeline-uploads",
            "key": "incoming/invoice-0042.pdf",
            "size": 48213,
            "content_type": "application/pdf"
        })
    );
}
