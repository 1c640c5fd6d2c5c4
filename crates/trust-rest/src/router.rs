//! Main application router.

use crate::{
    controllers::{circle_controller, health_controller, membership_controller, user_controller},
    middleware::{handle_panic, logging_middleware},
    openapi::ApiDoc,
    state::{AppState, ServiceInfo},
};
use axum::{
    extract::State,
    http::HeaderValue,
    middleware,
    routing::get,
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use trust_config::{AppConfig, ServerConfig};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the main application router.
///
/// Every handler runs behind panic recovery, the request timeout, CORS,
/// tracing and request logging. The metrics route is only mounted when
/// metrics are enabled and a recorder handle was installed in `state`.
pub fn create_router(state: AppState, config: &AppConfig) -> Router {
    let cors = create_cors_layer(&config.server);

    let api_router = Router::new()
        .nest("/users", user_controller::router())
        .nest(
            "/circles",
            circle_controller::router().merge(membership_controller::router()),
        );

    let mut router = Router::new()
        .route("/", get(root))
        .merge(health_controller::router())
        .nest("/api/v1", api_router);

    if config.observability.metrics_enabled && state.metrics.is_some() {
        router = router.route(
            &config.observability.metrics_path,
            get(health_controller::metrics),
        );
    }

    let router = router
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with REST endpoints and Swagger UI at /swagger-ui");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Root endpoint handler.
async fn root(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(state.info)
}
