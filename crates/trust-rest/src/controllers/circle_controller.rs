//! Circle controller.

use crate::{
    extractors::{parse_circle_id, ValidatedJson},
    responses::{created, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::debug;
use trust_service::{CircleResponse, CreateCircleRequest};

/// Creates the circle router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_circle))
        .route("/:id", get(get_circle))
}

/// Create a circle owned by an existing user.
#[utoipa::path(
    post,
    path = "/api/v1/circles",
    tag = "circles",
    request_body = CreateCircleRequest,
    responses(
        (status = 201, description = "Circle created", body = CircleResponse),
        (status = 400, description = "Owner does not exist"),
        (status = 422, description = "Invalid request")
    )
)]
pub async fn create_circle(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateCircleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CircleResponse>>), AppError> {
    debug!("Create circle request: {} (owner {})", request.name, request.owner_id);

    let response = state.circle_service.create_circle(request).await?;
    Ok(created(response))
}

/// Get a circle by ID.
#[utoipa::path(
    get,
    path = "/api/v1/circles/{id}",
    tag = "circles",
    params(("id" = i64, Path, description = "Circle ID")),
    responses(
        (status = 200, description = "Circle found", body = CircleResponse),
        (status = 400, description = "Invalid circle ID"),
        (status = 404, description = "Circle not found")
    )
)]
pub async fn get_circle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<CircleResponse> {
    debug!("Get circle request: {}", id);

    let circle_id = parse_circle_id(&id)?;
    let response = state.circle_service.get_circle(circle_id).await?;
    ok(response)
}
