use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::domain::error::TodoError;

/// JSON error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError { pub message: String }

/// Outward failure: a status plus an optional [`ApiError`] body.
#[derive(Debug)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub body: Option<ApiError>,
}

impl ApiFailure {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, body: Some(ApiError { message: message.into() }) }
    }

    pub fn bad_request(message: impl Into<String>) -> Self { Self::new(StatusCode::BAD_REQUEST, message) }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, axum::Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}

/// Malformed, mistyped or non-JSON bodies are client input errors.
impl From<JsonRejection> for ApiFailure {
    fn from(rejection: JsonRejection) -> Self { Self::bad_request(rejection.body_text()) }
}

impl From<TodoError> for ApiFailure {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::DescriptionRequired | TodoError::DescriptionConflict | TodoError::IdMismatch { .. } => {
                Self::bad_request(err.to_string())
            }
            TodoError::NotFound(_) => Self { status: StatusCode::NOT_FOUND, body: None },
            TodoError::ConcurrencyConflict(id) => {
                Self::new(StatusCode::CONFLICT, format!("todo item {id} was modified concurrently; reload it and retry"))
            }
            TodoError::Store(source) => {
                tracing::error!(error = ?source, "unhandled store failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }
}
