use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::coords::SiteError;
use crate::tracker::TrackerError;

pub enum ApiError {
    Validation(String),
    Tracker(TrackerError),
    Internal(String),
}

impl From<TrackerError> for ApiError {
    fn from(e: TrackerError) -> Self {
        match e {
            TrackerError::InvalidInput(msg) => ApiError::Validation(msg),
            TrackerError::InvalidSite(site) => site.into(),
            _ => ApiError::Tracker(e),
        }
    }
}

impl From<SiteError> for ApiError {
    fn from(e: SiteError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl ApiError {
    fn status_and_body(&self) -> (StatusCode, ErrorResponse) {
        match self {
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_message("invalid_input", msg),
            ),
            ApiError::Tracker(e @ TrackerError::Propagation { .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::with_message("propagation_failed", &e.to_string()),
            ),
            ApiError::Tracker(e @ TrackerError::ElementSetUnavailable { .. }) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::with_message("element_set_unavailable", &e.to_string()),
            ),
            ApiError::Tracker(TrackerError::InvalidInput(msg)) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_message("invalid_input", msg),
            ),
            ApiError::Tracker(e @ TrackerError::InvalidSite(_)) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_message("invalid_input", &e.to_string()),
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::with_message("internal_error", msg),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: None,
        }
    }

    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}
