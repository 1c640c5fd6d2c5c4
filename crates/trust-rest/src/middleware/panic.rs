//! Handler panic recovery.

use crate::responses::error_response;
use axum::{http::StatusCode, response::Response};
use std::any::Any;
use tracing::error;
use trust_core::ErrorResponse;

/// Turns a panic inside a handler into a 500 error envelope.
///
/// Used with `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error!("Handler panicked: {}", detail);
    metrics::counter!("trust_http_panics_total").increment(1);

    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorResponse {
            code: "INTERNAL_ERROR".to_string(),
            message: "Internal server error".to_string(),
            details: None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_maps_to_internal_error() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(String::from("boom")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(17_u8));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
