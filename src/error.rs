//! Error types for Librarium server

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::NotFound(msg) | AppError::Validation(msg) | AppError::BadRequest(msg) => msg,
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                e.to_string()
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(describe_validation_errors(&errors))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Flatten validator output into `field: reason; field: reason`, sorted by field name
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .errors()
        .iter()
        .flat_map(|(field, kind)| match kind {
            ValidationErrorsKind::Field(errs) => errs
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => format!("{}: {}", field, msg),
                    None => format!("{}: {}", field, e.code),
                })
                .collect::<Vec<_>>(),
            ValidationErrorsKind::Struct(inner) => vec![describe_validation_errors(inner)],
            ValidationErrorsKind::List(_) => vec![format!("{}: invalid entries", field)],
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
