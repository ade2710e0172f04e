//! Shared event pipeline domain primitives.
//!
//! This crate owns the persisted `Record` entity, handler request/response
//! contracts, id generation and the pure data projections. It intentionally
//! excludes AWS SDK and Lambda runtime concerns.

pub mod clock;
pub mod contract;
pub mod ids;
pub mod transform;
pub mod workflow;
