//! Circle membership controller.
//!
//! Mounted under `/circles` next to the circle routes.

use crate::{
    extractors::{parse_circle_id, parse_user_id, ValidatedJson},
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::debug;
use trust_core::UserId;
use trust_service::{AddMemberRequest, MemberListResponse, MembershipResponse};

/// Creates the membership router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:id/members", get(list_members).post(add_member))
        .route(
            "/:id/members/:user_id",
            get(check_membership).delete(remove_member),
        )
}

/// List a circle's members in stored order.
#[utoipa::path(
    get,
    path = "/api/v1/circles/{id}/members",
    tag = "members",
    params(("id" = i64, Path, description = "Circle ID")),
    responses(
        (status = 200, description = "Members of the circle", body = MemberListResponse),
        (status = 400, description = "Invalid circle ID"),
        (status = 502, description = "A member could not be resolved"),
        (status = 503, description = "Store unavailable or timed out")
    )
)]
pub async fn list_members(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MemberListResponse> {
    debug!("List members request: {}", id);

    let circle_id = parse_circle_id(&id)?;
    let users = state.membership_service.list_members(circle_id).await?;
    ok(MemberListResponse::new(circle_id, users))
}

/// Add a user to a circle.
#[utoipa::path(
    post,
    path = "/api/v1/circles/{id}/members",
    tag = "members",
    params(("id" = i64, Path, description = "Circle ID")),
    request_body = AddMemberRequest,
    responses(
        (status = 201, description = "Member added", body = MembershipResponse),
        (status = 400, description = "Invalid ID or unknown circle"),
        (status = 409, description = "Concurrent writes kept winning"),
        (status = 422, description = "Invalid request")
    )
)]
pub async fn add_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<AddMemberRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MembershipResponse>>), AppError> {
    debug!("Add member request: {} -> {}", request.user_id, id);

    let circle_id = parse_circle_id(&id)?;
    let user_id = UserId::new(request.user_id);
    state
        .membership_service
        .add_member(circle_id, user_id)
        .await?;

    Ok(created(MembershipResponse {
        circle_id,
        user_id,
        is_member: true,
    }))
}

/// Check whether a user belongs to a circle.
#[utoipa::path(
    get,
    path = "/api/v1/circles/{id}/members/{user_id}",
    tag = "members",
    params(
        ("id" = i64, Path, description = "Circle ID"),
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Membership status", body = MembershipResponse),
        (status = 400, description = "Invalid ID")
    )
)]
pub async fn check_membership(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(String, String)>,
) -> ApiResult<MembershipResponse> {
    debug!("Check membership request: {} in {}", user_id, id);

    let circle_id = parse_circle_id(&id)?;
    let user_id = parse_user_id(&user_id)?;
    let is_member = state
        .membership_service
        .check_membership(circle_id, user_id)
        .await?;

    ok(MembershipResponse {
        circle_id,
        user_id,
        is_member,
    })
}

/// Remove a user from a circle. Removing a non-member succeeds.
#[utoipa::path(
    delete,
    path = "/api/v1/circles/{id}/members/{user_id}",
    tag = "members",
    params(
        ("id" = i64, Path, description = "Circle ID"),
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "Member removed"),
        (status = 400, description = "Invalid ID"),
        (status = 409, description = "Concurrent writes kept winning")
    )
)]
pub async fn remove_member(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    debug!("Remove member request: {} from {}", user_id, id);

    let circle_id = parse_circle_id(&id)?;
    let user_id = parse_user_id(&user_id)?;
    state
        .membership_service
        .remove_member(circle_id, user_id)
        .await?;

    Ok(no_content())
}
