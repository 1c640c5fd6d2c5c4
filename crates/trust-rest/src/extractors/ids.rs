//! Path identifier parsing.

use crate::responses::AppError;
use trust_core::{CircleId, UserId};

/// Parses a circle ID path segment. Non-numeric or non-positive ids are 400s.
pub fn parse_circle_id(id: &str) -> Result<CircleId, AppError> {
    id.parse::<CircleId>().map_err(AppError)
}

/// Parses a user ID path segment. Non-numeric or non-positive ids are 400s.
pub fn parse_user_id(id: &str) -> Result<UserId, AppError> {
    id.parse::<UserId>().map_err(AppError)
}
