//! User entity.

use crate::UserId;
use serde::{Deserialize, Serialize};

/// A person who can be a member of circles.
///
/// The identifier is assigned by the store on insert; the record is
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,

    /// Display name.
    pub name: String,
}

impl User {
    /// Creates a user value for an already-stored row.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// A user known only by id, as recorded for a positive membership check.
    #[must_use]
    pub fn id_only(id: UserId) -> Self {
        Self {
            id,
            name: String::new(),
        }
    }
}
