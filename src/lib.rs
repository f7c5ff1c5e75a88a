//! docscore - document text extraction and engagement scoring.
//!
//! Uploaded PDFs and images are turned into text (pdftotext or Tesseract),
//! measured for word and sentence counts, and scored 0-100 with a short list
//! of improvement suggestions.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod ocr;
pub mod pipeline;
pub mod server;
pub mod utils;

pub use analysis::{AnalysisResult, Statistics};
pub use ocr::{ExtractionError, TextExtractor};
pub use pipeline::{AnalysisPipeline, TextSource, UploadedFile};
