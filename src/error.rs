use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::response::respond;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Persistence(#[from] sqlx::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }
}

// Every domain failure renders as a 400 envelope with a readable message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Persistence(ref err) = self {
            tracing::error!(error = %err, "storage failure");
        }
        respond(StatusCode::BAD_REQUEST, &self.to_string(), None::<()>)
    }
}
