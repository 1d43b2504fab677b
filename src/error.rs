use crate::common::Envelope;
use crate::validation::Violations;
use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Everything a handler reports itself. Anything else (a record that does
/// not serialize, a malformed body the extractor rejects) is left to the
/// framework's generic handling.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    #[error("Validation failed")]
    ValidationFailed { errors: Violations },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("serialization error: {err}"))
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound { resource } => {
                Envelope::message(StatusCode::NOT_FOUND, format!("{resource} not found"))
                    .into_response()
            }
            ApiError::ValidationFailed { errors } => {
                Envelope::validation_failed(&errors).into_response()
            }
            ApiError::Internal(message) => {
                tracing::error!("internal error: {message}");
                Envelope::message(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
                    .into_response()
            }
        }
    }
}
