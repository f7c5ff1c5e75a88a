//! JSON status endpoint.

use std::collections::BTreeMap;

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;

use super::super::AppState;
use crate::ocr::TextExtractor;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub tools: BTreeMap<String, bool>,
    pub max_upload_bytes: usize,
    pub ocr_language: String,
}

/// Report extraction tool availability and upload limits.
pub async fn api_status(State(state): State<AppState>) -> impl IntoResponse {
    let tools = tokio::task::spawn_blocking(TextExtractor::check_tools)
        .await
        .unwrap_or_default();

    Json(StatusResponse {
        tools: tools.into_iter().collect(),
        max_upload_bytes: state.settings.max_upload_bytes,
        ocr_language: state.settings.ocr_language.clone(),
    })
}
