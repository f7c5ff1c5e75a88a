//! Extraction tool availability check.

use console::style;

use crate::ocr::TextExtractor;

/// Print whether pdftotext and tesseract are on PATH.
pub fn cmd_check() -> anyhow::Result<()> {
    println!("\n{}", style("Extraction Tool Status").bold());
    println!("{}", "-".repeat(40));

    let mut all_found = true;
    for (tool, available) in TextExtractor::check_tools() {
        let status = if available {
            style("✓ found").green()
        } else {
            all_found = false;
            style("✗ not found").red()
        };
        println!("  {:<15} {}", tool, status);
    }

    if !all_found {
        println!(
            "\n  {}",
            style("Install with: apt install poppler-utils tesseract-ocr").dim()
        );
        anyhow::bail!("required extraction tools are missing");
    }

    Ok(())
}
