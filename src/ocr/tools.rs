//! Helpers for invoking the external extraction tools.

use std::process::{Command, Output};

use super::extractor::ExtractionError;

/// Tools the extractor shells out to.
pub const REQUIRED_TOOLS: [&str; 2] = ["pdftotext", "tesseract"];

/// Check if a binary is available in PATH.
pub fn check_binary(name: &str) -> bool {
    which::which(name).is_ok()
}

/// Outcome of running a tool, before it is mapped to a format-specific error.
pub(crate) enum ToolOutcome {
    Success(String),
    Failed(String),
}

/// Run a command and capture stdout.
///
/// A missing executable maps to `ToolNotFound`; a non-zero exit is handed back
/// to the caller with stderr so it can pick the right error kind.
pub(crate) fn run_tool(mut cmd: Command, tool_hint: &str) -> Result<ToolOutcome, ExtractionError> {
    match cmd.output() {
        Ok(output) => Ok(outcome(output)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ExtractionError::ToolNotFound(tool_hint.to_string()))
        }
        Err(e) => Err(ExtractionError::Io(e)),
    }
}

fn outcome(output: Output) -> ToolOutcome {
    if output.status.success() {
        ToolOutcome::Success(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        ToolOutcome::Failed(String::from_utf8_lossy(&output.stderr).trim().to_string())
    }
}
