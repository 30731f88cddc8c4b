//! API error types and their HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use activity::ActivityError;
use pose_filter::ValidationError;
use realtime::RealtimeError;
use sequence::SequenceError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid frame: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    UnknownActivity(#[from] ActivityError),

    #[error("{0}")]
    Stream(String),

    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Session limit reached ({0})")]
    TooManySessions(usize),

    #[error("Batch of {count} frames exceeds limit of {limit}")]
    BatchTooLarge { count: usize, limit: usize },
}

impl From<SequenceError> for ApiError {
    fn from(err: SequenceError) -> Self {
        match err {
            SequenceError::Validation(e) => ApiError::Validation(e),
            SequenceError::Activity(e) => ApiError::UnknownActivity(e),
        }
    }
}

impl From<RealtimeError> for ApiError {
    fn from(err: RealtimeError) -> Self {
        match err {
            RealtimeError::Validation(e) => ApiError::Validation(e),
            other => ApiError::Stream(other.to_string()),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Stream(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::UnknownActivity(_) => StatusCode::BAD_REQUEST,
            ApiError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::TooManySessions(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::BatchTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            metrics::counter!("poselab_validation_rejections_total").increment(1);
        }
        warn!("Request failed ({}): {}", status, self);
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
