//! AWS-oriented adapters and handlers for the event pipeline.
//!
//! This crate owns runtime integration details (Lambda handlers, table,
//! queue, topic and object storage adapters). Domain contracts live in
//! `event_pipeline_core`; every handler here is a synchronous function over
//! the adapter traits so it can be exercised with in-memory fakes.

pub mod adapters;
pub mod aws;
pub mod config;
pub mod error;
pub mod handlers;
#[cfg(feature = "test-helpers")]
pub mod test_helpers;
