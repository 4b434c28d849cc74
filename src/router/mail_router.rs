use axum::{
    response::{IntoResponse, Response},
    routing::{any, get},
    Router,
};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;

use crate::config::app_conf::HEALTH_ENDPOINT;
use crate::handler::mail_handler::submit_mail_handler;
use crate::service::submission_service::SubmissionService;
use crate::util::error::HandlerError;

/// Mail endpoint plus health check. Every method reaches the handler so
/// non-POST requests get the JSON 405 body rather than an empty one.
pub fn mail_router(service: Arc<dyn SubmissionService>, endpoint: &str) -> Router {
    Router::new()
        .route(endpoint, any(submit_mail_handler))
        .route(HEALTH_ENDPOINT, get(|| async { "OK" }))
        .with_state(service)
        .layer(CatchPanicLayer::custom(handle_panic))
}

pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown error".to_string()
    };
    error!("Handler panicked: {}", details);
    HandlerError::internal(details).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_panic_becomes_internal_error() {
        let response = handle_panic(Box::new("formatter exploded"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(42u8));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
