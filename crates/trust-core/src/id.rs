//! Typed ID wrappers for domain entities.
//!
//! Identifiers are assigned by the store from auto-increment sequences, so
//! both wrappers carry a signed 64-bit integer. Only strictly positive values
//! can ever refer to a stored row.

use crate::TrustError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// A strongly-typed wrapper for user IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Rejects identifiers that can never name a stored user.
    pub fn ensure_valid(self) -> Result<Self, TrustError> {
        if self.0 > 0 {
            Ok(self)
        } else {
            Err(TrustError::validation(format!("Invalid user ID: {}", self.0)))
        }
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = TrustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map_err(|_| TrustError::validation(format!("Invalid user ID: {}", s)))
            .and_then(|id| Self(id).ensure_valid())
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// A strongly-typed wrapper for circle IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct CircleId(pub i64);

impl CircleId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Rejects identifiers that can never name a stored circle.
    pub fn ensure_valid(self) -> Result<Self, TrustError> {
        if self.0 > 0 {
            Ok(self)
        } else {
            Err(TrustError::validation(format!("Invalid circle ID: {}", self.0)))
        }
    }
}

impl Display for CircleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CircleId {
    type Err = TrustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map_err(|_| TrustError::validation(format!("Invalid circle ID: {}", s)))
            .and_then(|id| Self(id).ensure_valid())
    }
}

impl From<i64> for CircleId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<CircleId> for i64 {
    fn from(id: CircleId) -> Self {
        id.0
    }
}
