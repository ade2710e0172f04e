//! In-memory collaborators for handler tests.
//!
//! Each fake records what it was asked to do behind a `Mutex` so tests can
//! assert on writes after the handler returns. Failures are opt-in per fake.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use event_pipeline_core::contract::{ObjectMetadata, Record};

use crate::adapters::blob_store::BlobStore;
use crate::adapters::queue::EventQueue;
use crate::adapters::record_store::RecordStore;
use crate::adapters::topic::NotificationTopic;

/// Text returned when an update targets a record that does not exist,
/// matching the table's conditional-check failure.
pub const MISSING_RECORD_ERROR: &str = "The conditional request failed";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Table fake with synchronous, insertion-ordered semantics.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: Mutex<Vec<Record>>,
    put_failure: Option<String>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `put_record` call fails with `message`.
    pub fn failing_puts(message: impl Into<String>) -> Self {
        Self {
            put_failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn seed(&self, record: Record) {
        lock(&self.records).push(record);
    }

    pub fn records(&self) -> Vec<Record> {
        lock(&self.records).clone()
    }

    pub fn get(&self, id: &str) -> Option<Record> {
        lock(&self.records)
            .iter()
            .find(|record| record.id == id)
            .cloned()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn put_record(&self, record: &Record) -> Result<(), String> {
        if let Some(message) = &self.put_failure {
            return Err(message.clone());
        }

        let mut records = lock(&self.records);
        match records.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        Ok(())
    }

    fn scan_records(&self, limit: usize) -> Result<Vec<Record>, String> {
        Ok(lock(&self.records).iter().take(limit).cloned().collect())
    }

    fn mark_processed(&self, id: &str, processed_at: i64) -> Result<(), String> {
        let mut records = lock(&self.records);
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| MISSING_RECORD_ERROR.to_string())?;
        record.mark_processed(processed_at);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingQueue {
    messages: Mutex<Vec<String>>,
    failure: Option<String>,
}

impl RecordingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<String> {
        lock(&self.messages).clone()
    }
}

impl EventQueue for RecordingQueue {
    fn send_message(&self, body: &str) -> Result<(), String> {
        if let Some(message) = &self.failure {
            return Err(message.clone());
        }
        lock(&self.messages).push(body.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub message: String,
    pub subject: String,
    pub message_id: String,
}

/// Topic fake that assigns sequential `msg-<n>` ids.
#[derive(Debug, Default)]
pub struct RecordingTopic {
    published: Mutex<Vec<PublishedMessage>>,
    failure: Option<String>,
}

impl RecordingTopic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn published(&self) -> Vec<PublishedMessage> {
        lock(&self.published).clone()
    }
}

impl NotificationTopic for RecordingTopic {
    fn publish(&self, message: &str, subject: &str) -> Result<String, String> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        let mut published = lock(&self.published);
        let message_id = format!("msg-{}", published.len() + 1);
        published.push(PublishedMessage {
            message: message.to_string(),
            subject: subject.to_string(),
            message_id: message_id.clone(),
        });
        Ok(message_id)
    }
}

/// Object store fake keyed by `(bucket, key)`. Unknown objects fail the
/// head call the way a missing object does.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    objects: Mutex<HashMap<(String, String), ObjectMetadata>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(
        self,
        bucket: &str,
        key: &str,
        size: i64,
        content_type: Option<&str>,
    ) -> Self {
        lock(&self.objects).insert(
            (bucket.to_string(), key.to_string()),
            ObjectMetadata {
                size,
                content_type: content_type.map(str::to_string),
            },
        );
        self
    }
}

impl BlobStore for InMemoryBlobStore {
    fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectMetadata, String> {
        lock(&self.objects)
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| format!("object s3://{bucket}/{key} not found"))
    }
}
