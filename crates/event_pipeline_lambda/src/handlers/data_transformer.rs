use event_pipeline_core::clock::Clock;
use event_pipeline_core::contract::{
    Record, TransformRequest, TransformResponse, RECORD_TYPE_TRANSFORMED,
};
use event_pipeline_core::ids::{generate_id, IdPrefix};
use event_pipeline_core::transform::transform_data;
use serde_json::{Map, Value};

use crate::adapters::record_store::RecordStore;
use crate::error::HandlerError;
use crate::handlers::response::{error_response, json_response, LambdaResponse};

pub fn handle_transform_event(
    event: Value,
    store: &impl RecordStore,
    clock: &dyn Clock,
) -> LambdaResponse {
    match transform_and_store(event, store, clock) {
        Ok(response) => json_response(200, response),
        Err(error) => {
            tracing::error!(component = "data_transformer", error = %error, "transform failed");
            error_response(500, &error.to_string())
        }
    }
}

pub fn transform_and_store(
    event: Value,
    store: &impl RecordStore,
    clock: &dyn Clock,
) -> Result<TransformResponse, HandlerError> {
    let request: TransformRequest = serde_json::from_value(event)?;
    let data = match request.data {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map,
        Some(_) => return Err(HandlerError::invalid_payload("data must be a JSON object")),
    };

    let view = transform_data(&data, clock.now_secs());
    let record = Record::new(
        generate_id(IdPrefix::Transform, clock),
        RECORD_TYPE_TRANSFORMED,
        serde_json::to_value(&view)?,
        clock.now_secs(),
    );
    store.put_record(&record).map_err(HandlerError::Store)?;

    tracing::info!(
        component = "data_transformer",
        record_id = %record.id,
        keys = view.transformed.uppercase_keys.len(),
        "transformed record stored"
    );

    Ok(TransformResponse {
        success: true,
        transformed: view,
    })
}

#[cfg(test)]
mod tests {
    use event_pipeline_core::clock::FixedClock;
    use event_pipeline_core::ids::matches_generated_pattern;
    use serde_json::json;

    use super::*;
    use crate::test_helpers::InMemoryRecordStore;

    fn clock() -> FixedClock {
        FixedClock::from_millis(1_771_058_000_000)
    }

    #[test]
    fn persists_original_and_derived_views() {
        let store = InMemoryRecordStore::new();
        let response = handle_transform_event(
            json!({"data": {"name": "alice", "age": 30}}),
            &store,
            &clock(),
        );

        assert_eq!(response.status_code, 200);
        let body = response.body_json().expect("body should be json");
        assert_eq!(body["success"], true);
        assert_eq!(body["transformed"]["original"], json!({"name": "alice", "age": 30}));
        assert_eq!(
            body["transformed"]["transformed"]["uppercase_keys"],
            json!({"NAME": "ALICE", "AGE": "30"})
        );
        assert_eq!(body["transformed"]["transformed"]["timestamp"], 1_771_058_000);

        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].record_type, RECORD_TYPE_TRANSFORMED);
        assert!(matches_generated_pattern(IdPrefix::Transform, &records[0].id));
        assert_eq!(records[0].data, body["transformed"]);
    }

    #[test]
    fn missing_data_transforms_an_empty_mapping() {
        let store = InMemoryRecordStore::new();
        let response = transform_and_store(json!({}), &store, &clock())
            .expect("empty input should succeed");

        assert!(response.transformed.original.is_empty());
        assert!(response.transformed.transformed.uppercase_keys.is_empty());
        assert_eq!(store.records().len(), 1);
    }

    #[test]
    fn non_object_data_is_a_server_error() {
        let store = InMemoryRecordStore::new();
        let response = handle_transform_event(json!({"data": [1, 2]}), &store, &clock());

        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body_json().expect("body should be json"),
            json!({"error": "data must be a JSON object"})
        );
        assert!(store.records().is_empty());
    }

    #[test]
    fn store_failure_is_reported() {
        let store = InMemoryRecordStore::failing_puts("ProvisionedThroughputExceeded");
        let response = handle_transform_event(json!({"data": {"a": 1}}), &store, &clock());

        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body_json().expect("body should be json")["error"],
            "ProvisionedThroughputExceeded"
        );
    }
}
