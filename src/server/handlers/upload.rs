//! Upload-and-analyze handler.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::super::error::ApiError;
use super::super::upload::{self, UploadError};
use super::super::AppState;
use crate::analysis::AnalysisResult;
use crate::pipeline::UploadedFile;

/// Multipart field carrying the document.
const FILE_FIELD: &str = "file";

/// Successful upload response.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    pub analysis: AnalysisResult,
}

/// Accept a single file, store it, and return its analysis.
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let multipart = match multipart {
        Ok(m) => m,
        Err(rejection) => {
            return ApiError::from(UploadError::Malformed(rejection.body_text())).into_response()
        }
    };

    match handle_upload(&state, multipart).await {
        Ok(analysis) => Json(UploadResponse {
            message: "File uploaded successfully",
            analysis,
        })
        .into_response(),
        Err(e) => e.into_response(),
    }
}

async fn handle_upload(state: &AppState, multipart: Multipart) -> Result<AnalysisResult, ApiError> {
    let file = receive_file(state, multipart).await?;
    let result = analyze_stored(state, &file).await;

    if !state.settings.keep_uploads {
        if let Err(e) = tokio::fs::remove_file(&file.path).await {
            tracing::warn!("Failed to remove {}: {}", file.path.display(), e);
        }
    }

    result
}

/// Read the `file` field and hand it to the upload boundary.
async fn receive_file(state: &AppState, mut multipart: Multipart) -> Result<UploadedFile, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let content = field.bytes().await.map_err(multipart_error)?;

        let file = upload::store(
            &state.settings.upload_dir,
            &original_name,
            content_type.as_deref(),
            &content,
            state.settings.max_upload_bytes,
        )
        .await?;
        return Ok(file);
    }

    Err(UploadError::NoFile.into())
}

/// Run the blocking pipeline off the async runtime.
async fn analyze_stored(state: &AppState, file: &UploadedFile) -> Result<AnalysisResult, ApiError> {
    let pipeline = state.pipeline.clone();
    let file = file.clone();

    tokio::task::spawn_blocking(move || pipeline.run(&file))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::TooLarge.into()
    } else {
        UploadError::Malformed(e.body_text()).into()
    }
}
