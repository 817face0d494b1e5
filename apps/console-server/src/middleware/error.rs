//! Error handling - uniform JSON error bodies.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use std::fmt;

use atrium_shared::{ApiError, FieldError};

/// Application-level error type rendered as a JSON error body.
#[derive(Debug)]
pub enum AppError {
    /// Structured failure from the upstream API, passed through for the
    /// notification layer to display.
    Upstream(ApiError),
    BadRequest(String),
    Internal(String),
}

/// Body handed to the console's notification surface: the individual
/// field/message pairs plus one joined line.
#[derive(Debug, Serialize)]
struct ErrorBody {
    errors: Vec<FieldError>,
    message: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Upstream(err) => write!(f, "upstream error: {}", err.joined_message()),
            AppError::BadRequest(msg) => write!(f, "bad request: {msg}"),
            AppError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Upstream(err) => err
                .status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Upstream(err) => ErrorBody {
                errors: err.errors.clone(),
                message: err.joined_message(),
            },
            AppError::BadRequest(msg) => ErrorBody {
                errors: vec![FieldError::message_only(msg.clone())],
                message: msg.clone(),
            },
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                ErrorBody {
                    errors: vec![FieldError::message_only("internal error")],
                    message: "internal error".to_string(),
                }
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        AppError::Upstream(err)
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
