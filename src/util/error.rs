use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::model::EnvelopeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerErrorKind {
    MethodNotAllowed,
    BadRequest,
    DispatchFailure,
    Internal,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::MethodNotAllowed => "MethodNotAllowed",
            HandlerErrorKind::BadRequest => "BadRequest",
            HandlerErrorKind::DispatchFailure => "DispatchFailure",
            HandlerErrorKind::Internal => "Internal",
        };
        write!(f, "{}", s)
    }
}

/// Error response of the mail endpoint, serialized as `{"error": ..., "details": ...}`
#[derive(Debug, Serialize)]
pub struct HandlerError {
    #[serde(skip)]
    pub kind: HandlerErrorKind,
    #[serde(rename = "error")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl HandlerError {
    pub fn new(kind: HandlerErrorKind, message: impl Into<String>) -> Self {
        HandlerError {
            kind,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn method_not_allowed() -> Self {
        Self::new(HandlerErrorKind::MethodNotAllowed, "Method not allowed")
    }

    pub fn dispatch_failed() -> Self {
        Self::new(HandlerErrorKind::DispatchFailure, "Failed to send email")
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(HandlerErrorKind::Internal, "Internal server error").with_details(details)
    }

    pub fn status(&self) -> StatusCode {
        match self.kind {
            HandlerErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HandlerErrorKind::DispatchFailure | HandlerErrorKind::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let allow_post = self.kind == HandlerErrorKind::MethodNotAllowed;
        let mut response = (status, axum::Json(self)).into_response();
        if allow_post {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("POST"));
        }
        response
    }
}

impl From<EnvelopeError> for HandlerError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::MissingTypeOrData => {
                HandlerError::new(HandlerErrorKind::BadRequest, "Missing type or data")
            }
            EnvelopeError::InvalidType => {
                HandlerError::new(HandlerErrorKind::BadRequest, "Invalid request type")
            }
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    #[error("Dispatch failed: {0}")]
    DispatchFailed(String),
}

impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::DispatchFailed(_) => HandlerError::dispatch_failed(),
        }
    }
}
