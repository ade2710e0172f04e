use event_pipeline_core::contract::Record;

pub trait RecordStore {
    fn put_record(&self, record: &Record) -> Result<(), String>;

    /// Unfiltered, unordered read of at most `limit` records.
    fn scan_records(&self, limit: usize) -> Result<Vec<Record>, String>;

    /// Sets `status=processed` and `processed_at`. Fails when no record with
    /// `id` exists.
    fn mark_processed(&self, id: &str, processed_at: i64) -> Result<(), String>;
}
