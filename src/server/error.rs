//! Mapping of upload and analysis failures to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::upload::UploadError;
use crate::ocr::ExtractionError;

/// Generic message for failures after the upload was accepted.
pub const PROCESSING_ERROR: &str = "Error processing file";

/// Errors surfaced by the upload endpoint.
#[derive(Debug)]
pub enum ApiError {
    Upload(UploadError),
    Extraction(ExtractionError),
    Internal(String),
}

impl From<UploadError> for ApiError {
    fn from(e: UploadError) -> Self {
        ApiError::Upload(e)
    }
}

impl From<ExtractionError> for ApiError {
    fn from(e: ExtractionError) -> Self {
        ApiError::Extraction(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Upload(e) if e.is_validation() => {
                tracing::debug!("Rejected upload: {}", e);
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Upload(e) => {
                tracing::error!("Upload failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, PROCESSING_ERROR.to_string())
            }
            ApiError::Extraction(e) => {
                tracing::error!("Extraction failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, PROCESSING_ERROR.to_string())
            }
            ApiError::Internal(e) => {
                tracing::error!("Analysis failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, PROCESSING_ERROR.to_string())
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
