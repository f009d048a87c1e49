//! API error type and status mapping.
//!
//! Every error leaving the HTTP boundary is a JSON body of the shape
//! `{"success": false, "message": "..."}`. Internal detail is logged,
//! never serialized.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use taskhive_core::error::TaskhiveError;

#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<TaskhiveError> for ApiError {
    fn from(err: TaskhiveError) -> Self {
        match &err {
            TaskhiveError::Validation { message } => Self::bad_request(message.clone()),
            TaskhiveError::AlreadyExists { .. } => Self::bad_request("Email already registered"),
            TaskhiveError::InvalidCredentials => Self::bad_request("Invalid credentials"),
            TaskhiveError::NotFound { entity, .. } => {
                Self::not_found(format!("{} not found", capitalize(entity)))
            }
            TaskhiveError::AuthenticationFailed { .. } => {
                Self::unauthorized("Invalid or expired token")
            }
            TaskhiveError::AuthorizationDenied { .. } => {
                Self::new(StatusCode::FORBIDDEN, "Invalid refresh token")
            }
            TaskhiveError::Database(_) | TaskhiveError::Crypto(_) | TaskhiveError::Internal(_) => {
                tracing::error!(error = %err, "internal error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
