//! Deadline for store calls.

use std::future::Future;
use std::time::Duration;
use trust_core::{TrustError, TrustResult};

/// Default deadline for a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(100);

/// Wraps an async store call with a timeout.
pub async fn with_timeout<F, Fut, T>(duration: Duration, f: F) -> TrustResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = TrustResult<T>>,
{
    tokio::time::timeout(duration, f())
        .await
        .map_err(|_| TrustError::Timeout(format!("Store call timed out after {:?}", duration)))?
}
