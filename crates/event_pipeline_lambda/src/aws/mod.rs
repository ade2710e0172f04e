//! AWS SDK implementations of the adapter traits.

pub mod dynamodb;
pub mod s3;
pub mod sns;
pub mod sqs;

use std::future::Future;

/// Drives an SDK future from synchronous handler code. Needs the
/// multi-thread tokio runtime the Lambda binaries start with.
pub(crate) fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
