use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use price_core::pricing::EstimateError;
use price_core::RepositoryError;

/// Error type returned by every handler.
///
/// Each variant maps to exactly one HTTP status; the body is always
/// `{"message": "..."}` so clients have a single error shape to parse.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or incomplete request input.
    Validation(String),
    /// Registration attempted with an email that already exists.
    DuplicateUser,
    /// Login with an unknown email or wrong password.
    InvalidCredentials,
    /// The requested record does not exist.
    NotFound(String),
    /// Anything the client cannot fix. The detail is logged, not leaked.
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::DuplicateUser => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Validation(msg) => msg.clone(),
            ApiError::DuplicateUser => "User already exists".to_string(),
            ApiError::InvalidCredentials => "Invalid credentials".to_string(),
            ApiError::NotFound(what) => format!("{} not found", what),
            ApiError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            error!(%detail, "request failed");
        }
        let body = Json(json!({ "message": self.message() }));
        (self.status(), body).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ApiError::NotFound("Record".to_string()),
            RepositoryError::DuplicateEmail => ApiError::DuplicateUser,
            RepositoryError::InvalidCredentials => ApiError::InvalidCredentials,
            RepositoryError::Database(msg)
            | RepositoryError::Connection(msg)
            | RepositoryError::Configuration(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<EstimateError> for ApiError {
    fn from(err: EstimateError) -> Self {
        ApiError::Validation(err.to_string())
    }
}
