//! Error types for the bookshop server

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An ISBN collision on create; carries the title already holding the ISBN
    #[error("isbn already exists: {title}")]
    Duplicate { title: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    EmptyBatch(&'static str),

    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl AppError {
    /// Wrap a datastore failure with a description of the failed operation
    pub fn store(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
        move |source| AppError::Store { context, source }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) | AppError::EmptyBatch(_) => "BadRequest",
            AppError::Duplicate { .. } => "Duplicate",
            AppError::NotFound(_) => "NotFound",
            AppError::Store { .. } | AppError::Database(_) => "DbFailure",
            AppError::Encoding(_) => "Failure",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::EmptyBatch(_) => StatusCode::BAD_REQUEST,
            AppError::Duplicate { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store { .. } | AppError::Database(_) | AppError::Encoding(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            tracing::warn!(error = %self, "request rejected");
            self.to_string()
        };

        let body = Json(ErrorResponse {
            error: self.kind().to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::BadRequest(errors.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
