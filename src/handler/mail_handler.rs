use axum::{body::Bytes, extract::State, http::Method, response::IntoResponse, Json};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::dto::submission_dto::SubmissionResponse;
use crate::model::SubmissionEnvelope;
use crate::service::submission_service::SubmissionService;
use crate::util::error::HandlerError;

/// Handler: lead form submission (public)
pub async fn submit_mail_handler(
    State(service): State<Arc<dyn SubmissionService>>,
    method: Method,
    body: Bytes,
) -> Result<impl IntoResponse, HandlerError> {
    if method != Method::POST {
        warn!("[submit_mail_handler] Rejected {} request", method);
        return Err(HandlerError::method_not_allowed());
    }

    // An unreadable body is treated like an empty one
    let payload: Value = serde_json::from_slice(&body).unwrap_or_else(|e| {
        debug!("[submit_mail_handler] Body is not JSON: {}", e);
        Value::Null
    });

    let envelope = SubmissionEnvelope::from_value(payload).map_err(|e| {
        warn!("[submit_mail_handler] Malformed envelope: {}", e);
        HandlerError::from(e)
    })?;
    info!("[submit_mail_handler] {} submission received", envelope.kind());

    service.submit(envelope).await.map_err(HandlerError::from)?;

    Ok(Json(SubmissionResponse::sent()))
}
