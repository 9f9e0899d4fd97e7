//! Validate command implementation
//!
//! Parses the input files and reports every rejected record with its line
//! number and reason. The command fails if any record was rejected or any
//! file could not be read.

use super::shared::{ImportSummary, ParsedFiles, run_parser, setup_logging};
use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use tracing::{debug, info, warn};

/// One rejected record in the machine-readable report
#[derive(Debug, Serialize)]
struct RejectionEntry {
    file: String,
    file_num: u32,
    line_number: usize,
    reason: String,
}

#[derive(Debug, Serialize)]
struct ValidationReport<'a> {
    generated_at: DateTime<Utc>,
    valid: bool,
    summary: &'a ImportSummary,
    rejections: Vec<RejectionEntry>,
    failures: Vec<RejectionEntry>,
}

/// Validate command runner
pub async fn run_validate(args: ValidateArgs) -> Result<ImportSummary> {
    setup_logging(&args.options)?;
    debug!("Validation arguments: {:?}", args);

    let parsed = run_parser(&args.options, &args.paths).await?;
    let summary = parsed.summary();

    match args.output_format {
        OutputFormat::Human => print_human_report(&parsed, &summary),
        OutputFormat::Json => print_json_report(&parsed, &summary)?,
    }

    if summary.is_clean() {
        info!(
            "Validation passed: {} files, {} waypoints",
            summary.files_processed, summary.stats.accepted
        );
        Ok(summary)
    } else {
        warn!(
            "Validation failed: {} rejected records, {} unreadable files",
            summary.stats.rejected, summary.files_failed
        );
        Err(Error::validation_failed(
            summary.stats.rejected,
            files_with_problems(&parsed),
        ))
    }
}

/// Number of files with at least one rejected record or a read failure
fn files_with_problems(parsed: &ParsedFiles) -> usize {
    parsed
        .reports
        .iter()
        .filter(|report| !report.result.stats.is_clean())
        .count()
        + parsed.failures.len()
}

fn rejection_entries(parsed: &ParsedFiles) -> Vec<RejectionEntry> {
    parsed
        .reports
        .iter()
        .flat_map(|report| {
            report
                .result
                .stats
                .rejections
                .iter()
                .map(move |rejection| RejectionEntry {
                    file: report.path.display().to_string(),
                    file_num: report.result.file_num,
                    line_number: rejection.line_number,
                    reason: rejection.reason.to_string(),
                })
        })
        .collect()
}

fn print_human_report(parsed: &ParsedFiles, summary: &ImportSummary) {
    println!("\n{}", "SeeYou Validation Results".bold());
    println!("{}", "=".repeat(60));

    if summary.is_clean() {
        println!("{}", "Overall Status: PASS".green().bold());
    } else {
        println!("{}", "Overall Status: FAIL".red().bold());
    }

    for entry in rejection_entries(parsed) {
        println!(
            "  {}:{}: {}",
            entry.file,
            entry.line_number,
            entry.reason.yellow()
        );
    }

    for (path, error) in &parsed.failures {
        println!("  {} {}: {}", "FAILED".red().bold(), path.display(), error);
    }

    println!();
    println!(
        "  Files:         {} ({} unreadable)",
        summary.files_processed + summary.files_failed,
        summary.files_failed
    );
    println!(
        "  Records:       {} accepted, {} rejected, {} skipped",
        summary.stats.accepted, summary.stats.rejected, summary.stats.skipped
    );
    println!("  Success rate:  {:.1}%", summary.stats.success_rate());
    println!();
}

fn print_json_report(parsed: &ParsedFiles, summary: &ImportSummary) -> Result<()> {
    let report = ValidationReport {
        generated_at: Utc::now(),
        valid: summary.is_clean(),
        summary,
        rejections: rejection_entries(parsed),
        failures: parsed
            .failures
            .iter()
            .map(|(path, error)| RejectionEntry {
                file: path.display().to_string(),
                file_num: 0,
                line_number: 0,
                reason: error.to_string(),
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
