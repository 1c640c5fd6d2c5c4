//! OpenAPI documentation configuration.

use crate::controllers::health_controller::{HealthResponse, ReadinessResponse};
use crate::state::ServiceInfo;
use trust_core::{CircleId, ErrorResponse, FieldError, UserId};
use trust_service::{
    AddMemberRequest, CircleResponse, CreateCircleRequest, CreateUserRequest, MemberListResponse,
    MembershipResponse, UserResponse,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the circle of trust API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Circle of Trust API",
        version = "1.0.0",
        description = "Users, circles and circle membership",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        // User endpoints
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::get_user,
        // Circle endpoints
        crate::controllers::circle_controller::create_circle,
        crate::controllers::circle_controller::get_circle,
        // Membership endpoints
        crate::controllers::membership_controller::list_members,
        crate::controllers::membership_controller::add_member,
        crate::controllers::membership_controller::check_membership,
        crate::controllers::membership_controller::remove_member,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            UserId,
            CircleId,
            ErrorResponse,
            FieldError,
            ServiceInfo,
            HealthResponse,
            ReadinessResponse,
            CreateUserRequest,
            UserResponse,
            CreateCircleRequest,
            CircleResponse,
            AddMemberRequest,
            MembershipResponse,
            MemberListResponse,
        )
    ),
    tags(
        (name = "users", description = "User endpoints"),
        (name = "circles", description = "Circle endpoints"),
        (name = "members", description = "Circle membership endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_paths_are_documented() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/api/v1/circles/{id}/members"));
        assert!(paths.contains_key("/api/v1/circles/{id}/members/{user_id}"));
        assert!(paths.contains_key("/api/v1/users/{id}"));
        assert!(paths.contains_key("/ready"));
    }
}
