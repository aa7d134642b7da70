use crate::schemas::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use sea_orm::DbErr;
use thiserror::Error;
use tracing::{error, warn};

/// Errors surfaced by repositories and services.
///
/// A failed login is not an error; see `UserService::check_login`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            AppError::Database(db_error) => error!("Request failed on database: {}", db_error),
            AppError::NotFound(what) => warn!("Request for missing resource: {}", what),
        }

        // Database details stay in the log, not on the wire.
        let message = match &self {
            AppError::Database(_) => "Internal server error".to_string(),
            AppError::NotFound(_) => self.to_string(),
        };

        let body = ErrorResponse {
            error: message,
            code: self.code().to_string(),
            success: false,
        };

        (status, Json(body)).into_response()
    }
}
