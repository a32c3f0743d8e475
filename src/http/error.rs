//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::models::TimeSlot;
use crate::services::BookingServiceError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Alternative free slots, present on allocation conflicts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<TimeSlot>>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            alternatives: None,
        }
    }

    pub fn with_alternatives(mut self, alternatives: Vec<TimeSlot>) -> Self {
        self.alternatives = Some(alternatives);
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Allocation rejected; re-propose using the attached alternatives
    Conflict {
        message: String,
        alternatives: Vec<TimeSlot>,
    },
    /// Internal server error
    Internal(String),
    /// Repository error
    Repository(RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Conflict {
                message,
                alternatives,
            } => (
                StatusCode::CONFLICT,
                ApiError::new("CONFLICT", message).with_alternatives(alternatives),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Repository(err) => match err {
                RepositoryError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", err.to_string()))
                }
                RepositoryError::ValidationError { .. } => (
                    StatusCode::BAD_REQUEST,
                    ApiError::new("BAD_REQUEST", err.to_string()),
                ),
            },
        };

        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<BookingServiceError> for AppError {
    fn from(err: BookingServiceError) -> Self {
        match err {
            BookingServiceError::Rejected {
                reason,
                alternatives,
            } => {
                if reason.wants_alternatives() {
                    AppError::Conflict {
                        message: reason.to_string(),
                        alternatives,
                    }
                } else {
                    AppError::BadRequest(reason.to_string())
                }
            }
            BookingServiceError::NotFound(id) => {
                AppError::NotFound(format!("Booking {} not found", id))
            }
            BookingServiceError::Repository(err) => AppError::Repository(err),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
