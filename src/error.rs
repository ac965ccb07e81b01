//! Error types for the Bookshelf server

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Closed set of failure kinds exposed to API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Unavailable,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::Unavailable(_) => ErrorKind::Unavailable,
            AppError::Database(e) => classify_database_error(e),
            AppError::Migration(_) => ErrorKind::Internal,
        }
    }

    /// Message safe to hand back to the client
    fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg.clone(),
            AppError::Unavailable(msg) => {
                tracing::error!("Service unavailable: {}", msg);
                "Service unavailable".to_string()
            }
            AppError::Database(e) => match classify_database_error(e) {
                ErrorKind::NotFound => "Record not found".to_string(),
                ErrorKind::Validation | ErrorKind::Conflict => e
                    .as_database_error()
                    .map(|db| db.message().to_string())
                    .unwrap_or_else(|| e.to_string()),
                ErrorKind::Unavailable => {
                    tracing::error!("Database unavailable: {:?}", e);
                    "Database unavailable".to_string()
                }
                ErrorKind::Internal => {
                    tracing::error!("Database error: {:?}", e);
                    "Database error".to_string()
                }
            },
            AppError::Migration(msg) => {
                tracing::error!("Migration error: {}", msg);
                "Internal server error".to_string()
            }
        }
    }
}

/// Map a driver error onto the client-facing error kind.
///
/// SQLSTATE class 22 is a data exception (value out of range, bad text
/// representation), 23505 a unique violation and 23503 a foreign key
/// violation.
pub fn classify_database_error(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::RowNotFound => ErrorKind::NotFound,
        sqlx::Error::Database(db) => {
            if db.is_unique_violation() || db.is_foreign_key_violation() {
                ErrorKind::Conflict
            } else if db.code().is_some_and(|code| code.starts_with("22")) {
                ErrorKind::Validation
            } else {
                ErrorKind::Internal
            }
        }
        sqlx::Error::Configuration(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_) => ErrorKind::Unavailable,
        _ => ErrorKind::Internal,
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("unable to parse JSON: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(format!("invalid id: {}", rejection.body_text()))
    }
}

/// Error response body
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.kind().status();
        let body = Json(ErrorResponse {
            message: self.public_message(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
