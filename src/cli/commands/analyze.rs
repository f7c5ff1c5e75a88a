//! Local file analysis command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use console::style;
use serde::Serialize;

use crate::analysis::AnalysisResult;
use crate::config::Settings;
use crate::ocr::TextExtractor;
use crate::pipeline::{AnalysisPipeline, UploadedFile};
use crate::utils::MediaType;

#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Analyze each file independently; one failure does not stop the rest.
pub async fn cmd_analyze(
    settings: &Settings,
    files: &[PathBuf],
    media_type: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let extractor = TextExtractor::new().with_language(&settings.ocr_language);
    let pipeline = Arc::new(AnalysisPipeline::new(extractor));

    let mut reports = Vec::with_capacity(files.len());
    for path in files {
        let outcome = analyze_one(pipeline.clone(), path, media_type).await;
        let report = match outcome {
            Ok(analysis) => FileReport {
                file: path.display().to_string(),
                analysis: Some(analysis),
                error: None,
            },
            Err(e) => FileReport {
                file: path.display().to_string(),
                analysis: None,
                error: Some(e.to_string()),
            },
        };

        if !json {
            print_report(&report);
        }
        reports.push(report);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    let failed = reports.iter().filter(|r| r.error.is_some()).count();
    if failed > 0 {
        anyhow::bail!("{} of {} files failed", failed, reports.len());
    }
    Ok(())
}

async fn analyze_one(
    pipeline: Arc<AnalysisPipeline>,
    path: &Path,
    media_type: Option<&str>,
) -> anyhow::Result<AnalysisResult> {
    let declared = match media_type {
        Some(m) => m.to_string(),
        None => MediaType::from_path(path)
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "cannot tell media type of {} (use --media-type)",
                    path.display()
                )
            })?,
    };

    let original_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let file = UploadedFile::new(path, declared, original_name);

    let result = tokio::task::spawn_blocking(move || pipeline.run(&file)).await??;
    Ok(result)
}

fn print_report(report: &FileReport) {
    println!("\n{}", style(&report.file).bold());

    let analysis = match (&report.analysis, &report.error) {
        (Some(analysis), _) => analysis,
        (None, Some(error)) => {
            println!("  {} {}", style("✗").red(), error);
            return;
        }
        (None, None) => return,
    };

    let score = analysis.engagement_score;
    let score_style = match score {
        80..=100 => style(score.to_string()).green(),
        50..=79 => style(score.to_string()).yellow(),
        _ => style(score.to_string()).red(),
    };
    println!("  Engagement score:   {}", score_style.bold());
    println!("  Words:              {}", analysis.statistics.word_count);
    println!("  Sentences:          {}", analysis.statistics.sentence_count);
    println!(
        "  Avg words/sentence: {}",
        analysis.statistics.average_display()
    );

    for suggestion in &analysis.suggestions {
        println!("  {} {}", style("→").cyan(), suggestion);
    }
}
