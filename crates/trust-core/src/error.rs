//! Unified error types for all layers of the service.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for the circle of trust service.
///
/// Every failure coming out of the store, the membership codec or the
/// services is expressed as one of these variants so the HTTP layer can map
/// it to a distinguishable status code.
#[derive(Error, Debug)]
pub enum TrustError {
    // ============ Request Errors ============
    /// Malformed request, rejected before touching cache or store
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Conflicting write (duplicate key or lost compare-and-swap)
    #[error("Conflict: {0}")]
    Conflict(String),

    // ============ Store Errors ============
    /// Network, pool or transport failure against the backing store
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Store call exceeded its deadline
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Query failed inside the store
    #[error("Database error: {0}")]
    Database(String),

    /// Stored bytes or columns did not decode
    #[error("Decode error: {0}")]
    Decode(String),

    /// A per-member lookup failed while assembling a member list
    #[error("Partial failure resolving member {user_id}: {message}")]
    PartialFailure { user_id: i64, message: String },

    // ============ Infrastructure Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Cache backend error
    #[error("Cache error: {0}")]
    Cache(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrustError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound { .. } => 404,
            Self::Conflict(_) => 409,
            Self::StoreUnavailable(_) | Self::Timeout(_) => 503,
            Self::PartialFailure { .. } => 502,
            Self::Database(_)
            | Self::Decode(_)
            | Self::Configuration(_)
            | Self::Cache(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::Timeout(_) => "TIMEOUT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::PartialFailure { .. } => "PARTIAL_FAILURE",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode<T: Into<String>>(message: T) -> Self {
        Self::Decode(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error originates from the backing store.
    #[must_use]
    pub const fn is_store_failure(&self) -> bool {
        matches!(
            self,
            Self::StoreUnavailable(_) | Self::Timeout(_) | Self::Database(_)
        )
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for TrustError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::StoreUnavailable(err.to_string()),
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::ColumnNotFound(_) => Self::Decode(err.to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    return Self::Conflict(db_err.message().to_string());
                }
                if db_err.is_foreign_key_violation() {
                    return Self::Validation(format!(
                        "Referenced row does not exist: {}",
                        db_err.message()
                    ));
                }
                Self::Database(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

#[cfg(feature = "prost")]
impl From<prost::DecodeError> for TrustError {
    fn from(err: prost::DecodeError) -> Self {
        Self::Decode(format!("Malformed membership blob: {}", err))
    }
}

#[cfg(feature = "prost")]
impl From<prost::EncodeError> for TrustError {
    fn from(err: prost::EncodeError) -> Self {
        Self::Internal(format!("Failed to encode membership blob: {}", err))
    }
}

impl From<serde_json::Error> for TrustError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `TrustError`.
    #[must_use]
    pub fn from_error(error: &TrustError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&TrustError> for ErrorResponse {
    fn from(error: &TrustError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(TrustError::validation("bad id").status_code(), 400);
        assert_eq!(TrustError::not_found("User", 1).status_code(), 404);
        assert_eq!(TrustError::conflict("lost race").status_code(), 409);
        assert_eq!(TrustError::StoreUnavailable("down".to_string()).status_code(), 503);
        assert_eq!(TrustError::Timeout("slow".to_string()).status_code(), 503);
        assert_eq!(TrustError::Database("syntax".to_string()).status_code(), 500);
        assert_eq!(TrustError::decode("garbage").status_code(), 500);
        assert_eq!(
            TrustError::PartialFailure {
                user_id: 3,
                message: "missing".to_string()
            }
            .status_code(),
            502
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(TrustError::validation("x").error_code(), "VALIDATION_ERROR");
        assert_eq!(TrustError::not_found("Circle", 7).error_code(), "NOT_FOUND");
        assert_eq!(TrustError::conflict("x").error_code(), "CONFLICT");
        assert_eq!(
            TrustError::StoreUnavailable("x".to_string()).error_code(),
            "STORE_UNAVAILABLE"
        );
        assert_eq!(TrustError::Timeout("x".to_string()).error_code(), "TIMEOUT");
        assert_eq!(TrustError::decode("x").error_code(), "DECODE_ERROR");
        assert_eq!(TrustError::internal("x").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_store_failures() {
        assert!(TrustError::StoreUnavailable("conn reset".to_string()).is_store_failure());
        assert!(TrustError::Timeout("100s".to_string()).is_store_failure());
        assert!(TrustError::Database("bad sql".to_string()).is_store_failure());
        assert!(!TrustError::decode("truncated").is_store_failure());
        assert!(!TrustError::validation("bad").is_store_failure());
    }

    #[test]
    fn test_not_found_message() {
        let err = TrustError::not_found("User", 42);
        assert!(err.to_string().contains("User"));
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_prost_decode_error_maps_to_decode() {
        // field 1 varint tag with no payload
        let decode_err = <i64 as prost::Message>::decode(&[0x08_u8][..]).unwrap_err();
        let err: TrustError = decode_err.into();
        assert!(matches!(err, TrustError::Decode(_)));
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: TrustError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, TrustError::NotFound { .. }));
    }

    #[test]
    fn test_pool_timeout_maps_to_store_unavailable() {
        let err: TrustError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, TrustError::StoreUnavailable(_)));
    }

    #[test]
    fn test_error_response_from_error() {
        let err = TrustError::not_found("Circle", 7);
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(!response.message.is_empty());
        assert!(response.details.is_none());
    }

    #[test]
    fn test_error_response_with_details() {
        let err = TrustError::validation("bad input");
        let details = vec![FieldError {
            field: "name".to_string(),
            message: "Name must not be blank".to_string(),
            code: "not_blank".to_string(),
        }];
        let response = ErrorResponse::from(&err).with_details(details);
        assert_eq!(response.details.map(|d| d.len()), Some(1));
    }
}
