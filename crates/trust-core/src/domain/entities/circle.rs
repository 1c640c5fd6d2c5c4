//! Circle entity.

use crate::{CircleId, UserId};
use serde::{Deserialize, Serialize};

/// A named circle of trust owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Circle {
    /// Store-assigned identifier.
    pub id: CircleId,

    /// User who created the circle.
    pub owner_id: UserId,

    /// Circle name.
    pub name: String,
}

impl Circle {
    /// Creates a circle value for an already-stored row.
    #[must_use]
    pub fn new(id: CircleId, owner_id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            owner_id,
            name: name.into(),
        }
    }
}
