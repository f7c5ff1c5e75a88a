//! OCR and text extraction module.
//!
//! Extracts text from uploaded documents using:
//! - pdftotext (Poppler) for PDF text extraction
//! - Tesseract OCR for PNG and JPEG images
//!
//! Both tools are invoked as child processes and must be on `PATH`.

mod extractor;
mod tools;

pub use extractor::{ExtractionError, ExtractionStrategy, TextExtractor};
pub use tools::check_binary;
