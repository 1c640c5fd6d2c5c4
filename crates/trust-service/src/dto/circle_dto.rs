//! Circle-related DTOs.

use serde::{Deserialize, Serialize};
use trust_core::{Circle, CircleId, UserId};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new circle.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCircleRequest {
    #[validate(range(min = 1, message = "Owner ID must be positive"))]
    pub owner_id: i64,

    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "trust_core::rules::not_blank", message = "Name must not be blank")
    )]
    pub name: String,
}

/// Circle response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CircleResponse {
    pub id: CircleId,
    pub owner_id: UserId,
    pub name: String,
}

impl From<Circle> for CircleResponse {
    fn from(circle: Circle) -> Self {
        Self {
            id: circle.id,
            owner_id: circle.owner_id,
            name: circle.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_circle_request_valid() {
        let request = CreateCircleRequest {
            owner_id: 42,
            name: "family".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_circle_request_rejects_bad_owner() {
        let request = CreateCircleRequest {
            owner_id: 0,
            name: "family".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_circle_request_rejects_blank_name() {
        let request = CreateCircleRequest {
            owner_id: 42,
            name: " ".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
