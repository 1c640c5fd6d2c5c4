//! Result type aliases for the circle of trust service.

use crate::TrustError;

/// A specialized `Result` type for service operations.
pub type TrustResult<T> = Result<T, TrustError>;
