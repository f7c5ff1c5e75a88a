//! Text extraction from documents using pdftotext and Tesseract.

use std::path::Path;
use std::process::Command;
use thiserror::Error;

use super::tools::{check_binary, run_tool, ToolOutcome, REQUIRED_TOOLS};
use crate::utils::MediaType;

/// Errors that can occur during text extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("OCR failed: {0}")]
    OcrFailure(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// How text is obtained from a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Direct text extraction from the PDF text layer.
    PdfText,
    /// OCR over a raster image.
    ImageOcr,
}

impl ExtractionStrategy {
    /// Pick the strategy for a declared media type.
    pub fn for_media_type(media_type: MediaType) -> Self {
        match media_type {
            MediaType::Pdf => ExtractionStrategy::PdfText,
            MediaType::Png | MediaType::Jpeg => ExtractionStrategy::ImageOcr,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStrategy::PdfText => "pdftotext",
            ExtractionStrategy::ImageOcr => "tesseract",
        }
    }
}

/// Text extractor that uses external tools.
#[derive(Debug, Clone)]
pub struct TextExtractor {
    /// Tesseract language setting.
    tesseract_lang: String,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self {
            tesseract_lang: "eng".to_string(),
        }
    }
}

impl TextExtractor {
    /// Create a new text extractor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set Tesseract language.
    pub fn with_language(mut self, lang: &str) -> Self {
        self.tesseract_lang = lang.to_string();
        self
    }

    /// Language passed to Tesseract.
    pub fn language(&self) -> &str {
        &self.tesseract_lang
    }

    /// Resolve the extraction strategy for a declared MIME type.
    pub fn strategy_for(&self, mime_type: &str) -> Result<ExtractionStrategy, ExtractionError> {
        MediaType::from_mime(mime_type)
            .map(ExtractionStrategy::for_media_type)
            .ok_or_else(|| ExtractionError::UnsupportedType(mime_type.to_string()))
    }

    /// Extract text from a file based on its MIME type.
    pub fn extract(&self, file_path: &Path, mime_type: &str) -> Result<String, ExtractionError> {
        let strategy = self.strategy_for(mime_type)?;
        tracing::debug!(
            "Extracting {} ({}) via {}",
            file_path.display(),
            mime_type,
            strategy.as_str()
        );

        match strategy {
            ExtractionStrategy::PdfText => self.extract_pdf(file_path),
            ExtractionStrategy::ImageOcr => self.extract_image(file_path),
        }
    }

    /// Extract the text layer of every page, in document order.
    fn extract_pdf(&self, file_path: &Path) -> Result<String, ExtractionError> {
        let bytes = std::fs::read(file_path)?;
        if sniff_mime(&bytes) != Some("application/pdf") {
            return Err(ExtractionError::MalformedDocument(format!(
                "{} is not a PDF",
                file_path.display()
            )));
        }

        self.run_pdftotext(file_path)
    }

    /// Extract text from an image file using Tesseract.
    fn extract_image(&self, file_path: &Path) -> Result<String, ExtractionError> {
        let bytes = std::fs::read(file_path)?;
        if !infer::is_image(&bytes) {
            return Err(ExtractionError::OcrFailure(format!(
                "{} is not a readable image",
                file_path.display()
            )));
        }

        self.run_tesseract(file_path)
    }

    /// Run pdftotext on a PDF file, writing UTF-8 text to stdout.
    fn run_pdftotext(&self, file_path: &Path) -> Result<String, ExtractionError> {
        let mut cmd = Command::new("pdftotext");
        cmd.args(["-enc", "UTF-8"]).arg(file_path).arg("-");

        match run_tool(cmd, "pdftotext (install poppler-utils)")? {
            ToolOutcome::Success(text) => Ok(text),
            ToolOutcome::Failed(stderr) => Err(ExtractionError::MalformedDocument(format!(
                "pdftotext failed: {}",
                stderr
            ))),
        }
    }

    /// Run Tesseract OCR on an image.
    fn run_tesseract(&self, image_path: &Path) -> Result<String, ExtractionError> {
        let mut cmd = Command::new("tesseract");
        cmd.arg(image_path)
            .arg("stdout")
            .args(["-l", &self.tesseract_lang]);

        match run_tool(cmd, "tesseract (install tesseract-ocr)")? {
            ToolOutcome::Success(text) => Ok(text),
            ToolOutcome::Failed(stderr) => Err(ExtractionError::OcrFailure(format!(
                "tesseract failed: {}",
                stderr
            ))),
        }
    }

    /// Check which external tools are available.
    pub fn check_tools() -> Vec<(String, bool)> {
        REQUIRED_TOOLS
            .iter()
            .map(|tool| (tool.to_string(), check_binary(tool)))
            .collect()
    }
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    infer::get(bytes).map(|kind| kind.mime_type())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file_with(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn test_check_tools() {
        let tools = TextExtractor::check_tools();
        assert_eq!(tools.len(), 2);
        for (tool, available) in tools {
            println!("{}: {}", tool, if available { "found" } else { "missing" });
        }
    }

    #[test]
    fn test_strategy_dispatch() {
        let extractor = TextExtractor::new();
        assert_eq!(
            extractor.strategy_for("application/pdf").unwrap(),
            ExtractionStrategy::PdfText
        );
        assert_eq!(
            extractor.strategy_for("image/png").unwrap(),
            ExtractionStrategy::ImageOcr
        );
        assert_eq!(
            extractor.strategy_for("image/jpeg").unwrap(),
            ExtractionStrategy::ImageOcr
        );
    }

    #[test]
    fn test_unsupported_type() {
        let file = temp_file_with(b"plain text");
        let err = TextExtractor::new()
            .extract(file.path(), "text/plain")
            .unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedType(ref t) if t == "text/plain"));
    }

    #[test]
    fn test_malformed_pdf() {
        let file = temp_file_with(b"this is definitely not a pdf");
        let err = TextExtractor::new()
            .extract(file.path(), "application/pdf")
            .unwrap_err();
        assert!(matches!(err, ExtractionError::MalformedDocument(_)));
    }

    #[test]
    fn test_corrupt_image() {
        let file = temp_file_with(&[0u8; 64]);
        let err = TextExtractor::new()
            .extract(file.path(), "image/png")
            .unwrap_err();
        assert!(matches!(err, ExtractionError::OcrFailure(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TextExtractor::new()
            .extract(&dir.path().join("gone.pdf"), "application/pdf")
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Io(_)));
    }

    #[test]
    fn test_extract_does_not_modify_input() {
        let file = temp_file_with(b"not a pdf either");
        let _ = TextExtractor::new().extract(file.path(), "application/pdf");
        assert_eq!(std::fs::read(file.path()).unwrap(), b"not a pdf either");
    }

    #[test]
    fn test_language_override() {
        let extractor = TextExtractor::new().with_language("deu");
        assert_eq!(extractor.language(), "deu");
        assert_eq!(TextExtractor::default().language(), "eng");
    }
}
