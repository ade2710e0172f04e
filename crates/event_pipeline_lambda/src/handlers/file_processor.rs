use event_pipeline_core::clock::Clock;
use event_pipeline_core::contract::{
    BatchSummary, FileRecordData, Record, RECORD_TYPE_FILE_PROCESSED,
};
use event_pipeline_core::ids::{generate_id, IdPrefix};
use serde_json::Value;

use crate::adapters::blob_store::BlobStore;
use crate::adapters::record_store::RecordStore;
use crate::error::HandlerError;
use crate::handlers::response::{error_response, json_response, LambdaResponse};

pub fn handle_object_created_event(
    event: &Value,
    blobs: &impl BlobStore,
    store: &impl RecordStore,
    clock: &dyn Clock,
) -> LambdaResponse {
    match record_object_metadata(event, blobs, store, clock) {
        Ok(summary) => json_response(200, summary),
        Err(error) => {
            tracing::error!(
                component = "file_processor",
                error = %error,
                "notification batch failed"
            );
            error_response(500, &error.to_string())
        }
    }
}

/// Heads each notified object and stores one `file_processed` record per
/// notification, in order. Records written before a failure are kept.
pub fn record_object_metadata(
    event: &Value,
    blobs: &impl BlobStore,
    store: &impl RecordStore,
    clock: &dyn Clock,
) -> Result<BatchSummary, HandlerError> {
    let records = match event.get("Records") {
        None | Some(Value::Null) => &[][..],
        Some(Value::Array(records)) => records.as_slice(),
        Some(_) => return Err(HandlerError::invalid_payload("Records must be an array")),
    };

    let total = records.len();
    let mut processed = 0usize;

    for notification in records {
        let bucket = required_str(notification, "/s3/bucket/name")?;
        let key = required_str(notification, "/s3/object/key")?;

        let metadata = blobs
            .head_object(bucket, key)
            .map_err(HandlerError::BlobStore)?;
        let data = FileRecordData::new(bucket, key, metadata);
        let record = Record::new(
            generate_id(IdPrefix::File, clock),
            RECORD_TYPE_FILE_PROCESSED,
            serde_json::to_value(&data)?,
            clock.now_secs(),
        );
        store.put_record(&record).map_err(HandlerError::Store)?;

        tracing::info!(
            component = "file_processor",
            record_id = %record.id,
            bucket = %data.bucket,
            key = %data.key,
            size = data.size,
            "file metadata recorded"
        );
        processed += 1;
    }

    Ok(BatchSummary { processed, total })
}

fn required_str<'a>(notification: &'a Value, pointer: &str) -> Result<&'a str, HandlerError> {
    notification
        .pointer(pointer)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            HandlerError::invalid_payload(format!(
                "S3 record is missing {}",
                pointer_label(pointer)
            ))
        })
}

fn pointer_label(pointer: &str) -> String {
    pointer.trim_start_matches('/').replace('/', ".")
}
