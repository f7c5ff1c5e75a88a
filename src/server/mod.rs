//! Web server for uploading and scoring documents.
//!
//! Serves a drag-and-drop upload page and a `POST /upload` endpoint that runs
//! each uploaded file through the analysis pipeline.

mod assets;
mod error;
mod handlers;
mod routes;
pub mod upload;

pub use error::{ApiError, PROCESSING_ERROR};
pub use handlers::{StatusResponse, UploadResponse};
pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::ocr::TextExtractor;
use crate::pipeline::AnalysisPipeline;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub pipeline: Arc<AnalysisPipeline>,
}

impl AppState {
    /// State backed by the external extraction tools.
    pub fn new(settings: Settings) -> Self {
        let extractor = TextExtractor::new().with_language(&settings.ocr_language);
        Self::with_pipeline(settings, AnalysisPipeline::new(extractor))
    }

    pub fn with_pipeline(settings: Settings, pipeline: AnalysisPipeline) -> Self {
        Self {
            settings: Arc::new(settings),
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Start the web server.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    settings.ensure_directories()?;

    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port).parse()?;
    let app = create_router(AppState::new(settings));

    tracing::info!("Starting server at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
