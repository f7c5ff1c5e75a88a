//! Extraction → analysis → scoring for a single uploaded file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::analysis::{AnalysisResult, EngagementScorer, TextAnalyzer};
use crate::ocr::{ExtractionError, TextExtractor};

/// A file handed over by the upload boundary.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub path: PathBuf,
    pub declared_media_type: String,
    pub original_name: String,
}

impl UploadedFile {
    pub fn new(
        path: impl Into<PathBuf>,
        declared_media_type: impl Into<String>,
        original_name: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            declared_media_type: declared_media_type.into(),
            original_name: original_name.into(),
        }
    }
}

/// Anything that can turn a stored file into text.
pub trait TextSource: Send + Sync {
    fn extract(&self, path: &Path, media_type: &str) -> Result<String, ExtractionError>;
}

impl TextSource for TextExtractor {
    fn extract(&self, path: &Path, media_type: &str) -> Result<String, ExtractionError> {
        TextExtractor::extract(self, path, media_type)
    }
}

/// Runs one file through extraction, analysis and scoring.
///
/// Holds no per-run state, so a single instance can serve concurrent calls.
#[derive(Clone)]
pub struct AnalysisPipeline {
    source: Arc<dyn TextSource>,
    analyzer: TextAnalyzer,
    scorer: EngagementScorer,
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new(TextExtractor::new())
    }
}

impl AnalysisPipeline {
    pub fn new(source: impl TextSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
            analyzer: TextAnalyzer::new(),
            scorer: EngagementScorer::new(),
        }
    }

    /// Extract, analyze and score a file. Extraction errors are returned as-is.
    pub fn run(&self, file: &UploadedFile) -> Result<AnalysisResult, ExtractionError> {
        tracing::debug!(
            "Analyzing {} ({}) from {}",
            file.original_name,
            file.declared_media_type,
            file.path.display()
        );

        let text = self
            .source
            .extract(&file.path, &file.declared_media_type)?;
        tracing::debug!("Extracted {} bytes of text", text.len());

        Ok(self.analyze_text(&text))
    }

    /// Analyze and score text that has already been extracted.
    pub fn analyze_text(&self, text: &str) -> AnalysisResult {
        let statistics = self.analyzer.analyze(text);
        let card = self.scorer.score(text, &statistics);
        tracing::debug!(
            "Scored {} words / {} sentences: {}",
            statistics.word_count,
            statistics.sentence_count,
            card.score
        );

        AnalysisResult {
            statistics,
            engagement_score: card.score,
            suggestions: card.suggestions,
        }
    }
}
