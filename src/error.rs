//! Error types for the Syllabus Extractor server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::document::DocumentError;
use crate::storage::{ArtifactError, FetchError};

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    msg.clone(),
                )
            }
            AppError::Document(e) => {
                tracing::error!("Document error: {}", e);
                let status = match e {
                    DocumentError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, "document_error", format!("Error processing PDF: {}", e))
            }
            AppError::Fetch(e) => {
                tracing::error!("Fetch error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "fetch_error",
                    format!("Could not load syllabus PDF: {}", e),
                )
            }
            AppError::Artifact(ArtifactError::InvalidName(name)) => (
                StatusCode::BAD_REQUEST,
                "bad_request",
                format!("Invalid filename: {}", name),
            ),
            AppError::Artifact(e) => {
                tracing::error!("Artifact error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "artifact_error",
                    format!("Error creating PDF: {}", e),
                )
            }
            AppError::Io(e) => {
                tracing::error!("IO error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "io_error",
                    "IO error".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            success: false,
            error: error_type,
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::PdfWriteError;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (
                AppError::Artifact(ArtifactError::InvalidName("../x".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Artifact(ArtifactError::Pdf(PdfWriteError::NoPages)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Fetch(FetchError::Status(404)), StatusCode::BAD_GATEWAY),
            (
                AppError::Document(DocumentError::Timeout(120)),
                StatusCode::GATEWAY_TIMEOUT,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
