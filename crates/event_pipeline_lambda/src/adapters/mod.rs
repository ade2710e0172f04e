pub mod blob_store;
pub mod queue;
pub mod record_store;
pub mod topic;
