//! Membership DTOs.

use crate::dto::UserResponse;
use serde::{Deserialize, Serialize};
use trust_core::{CircleId, User, UserId};
use utoipa::ToSchema;
use validator::Validate;

/// Request to add a user to a circle.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddMemberRequest {
    #[validate(range(min = 1, message = "User ID must be positive"))]
    pub user_id: i64,
}

/// Result of a membership check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MembershipResponse {
    pub circle_id: CircleId,
    pub user_id: UserId,
    pub is_member: bool,
}

/// Members of a circle in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MemberListResponse {
    pub circle_id: CircleId,
    pub members: Vec<UserResponse>,
    pub total: usize,
}

impl MemberListResponse {
    #[must_use]
    pub fn new(circle_id: CircleId, users: Vec<User>) -> Self {
        let members: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
        Self {
            circle_id,
            total: members.len(),
            members,
        }
    }
}
