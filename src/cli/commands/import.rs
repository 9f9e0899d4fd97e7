//! Import command implementation
//!
//! Parses the input files, hands the waypoints to a [`WaypointStore`] in
//! file order and prints a summary.

use super::shared::{FileReport, ImportSummary, ParsedFiles, run_parser, setup_logging};
use crate::app::services::seeyou_parser::ParseResult;
use crate::app::services::waypoint_store::{StoredWaypoint, WaypointSink, WaypointStore};
use crate::cli::args::{ImportArgs, OutputFormat};
use crate::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use tracing::{debug, info};

/// Machine-readable import report
#[derive(Debug, Serialize)]
struct ImportReport<'a> {
    generated_at: DateTime<Utc>,
    summary: &'a ImportSummary,
    files: Vec<&'a ParseResult>,
    failures: Vec<FailureEntry>,
    landables: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    waypoints: Option<Vec<&'a StoredWaypoint>>,
}

#[derive(Debug, Serialize)]
struct FailureEntry {
    path: String,
    error: String,
}

/// Import command runner
pub async fn run_import(args: ImportArgs) -> Result<ImportSummary> {
    setup_logging(&args.options)?;
    debug!("Import arguments: {:?}", args);

    let mut parsed = run_parser(&args.options, &args.paths).await?;

    // Every file failed: report the first error
    if parsed.reports.is_empty() && !parsed.failures.is_empty() {
        let (_, error) = parsed.failures.remove(0);
        return Err(error);
    }

    let store = collect_waypoints(&parsed.reports);
    let summary = parsed.summary();

    match args.output_format {
        OutputFormat::Human => print_human_report(&parsed, &store, &summary, args.list),
        OutputFormat::Json => print_json_report(&parsed, &store, &summary, args.list)?,
    }

    info!(
        "Imported {} waypoints from {} files in {:.2}s",
        store.len(),
        summary.files_processed,
        summary.processing_time_seconds
    );

    Ok(summary)
}

/// Add the waypoints of every file to a store, in file order
pub fn collect_waypoints(reports: &[FileReport]) -> WaypointStore {
    let mut store = WaypointStore::new();
    for report in reports {
        for waypoint in &report.waypoints {
            store.add_waypoint(waypoint.clone());
        }
    }
    store
}

fn print_human_report(
    parsed: &ParsedFiles,
    store: &WaypointStore,
    summary: &ImportSummary,
    list: bool,
) {
    println!("\n{}", "SeeYou Import Summary".bold());
    println!("{}", "=".repeat(60));

    for report in &parsed.reports {
        let stats = &report.result.stats;
        let rejected = if stats.rejected > 0 {
            format!("{} rejected", stats.rejected).red()
        } else {
            "0 rejected".green()
        };
        println!(
            "  [{}] {}: {} waypoints, {}",
            report.result.file_num,
            report.path.display(),
            stats.accepted,
            rejected
        );
    }

    for (path, error) in &parsed.failures {
        println!("  {} {}: {}", "FAILED".red().bold(), path.display(), error);
    }

    println!();
    println!("  Files processed:  {}", summary.files_processed);
    if summary.files_failed > 0 {
        println!(
            "  Files failed:     {}",
            summary.files_failed.to_string().red()
        );
    }
    println!("  Waypoints:        {}", store.len());
    println!("  Landable sites:   {}", store.landables().len());
    println!(
        "  Records:          {} ({} skipped, {} rejected)",
        summary.stats.total_records, summary.stats.skipped, summary.stats.rejected
    );
    if summary.stats.truncated_records > 0 {
        println!(
            "  Truncated:        {}",
            summary.stats.truncated_records.to_string().yellow()
        );
    }
    println!("  Success rate:     {:.1}%", summary.stats.success_rate());
    println!("  Time:             {:.2}s", summary.processing_time_seconds);

    if list {
        println!("\n{}", "Waypoints".bold());
        for stored in store.iter() {
            let waypoint = &stored.waypoint;
            let altitude = waypoint
                .altitude
                .map(|a| format!("{:.0}m", a))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  {:>5}  {:<24} {:>22} {:>7}  {:<28} {}",
                stored.id,
                waypoint.name,
                waypoint.location.to_string(),
                altitude,
                waypoint.flags.to_string(),
                waypoint.comment.dimmed()
            );
        }
    }
    println!();
}

fn print_json_report(
    parsed: &ParsedFiles,
    store: &WaypointStore,
    summary: &ImportSummary,
    list: bool,
) -> Result<()> {
    let report = ImportReport {
        generated_at: Utc::now(),
        summary,
        files: parsed.reports.iter().map(|r| &r.result).collect(),
        failures: parsed
            .failures
            .iter()
            .map(|(path, error)| FailureEntry {
                path: path.display().to_string(),
                error: error.to_string(),
            })
            .collect(),
        landables: store.landables().len(),
        waypoints: list.then(|| store.iter().collect()),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{GeoPoint, Waypoint};
    use crate::app::services::seeyou_parser::ParseStats;
    use std::path::PathBuf;

    fn report(file_num: u32, names: &[&str]) -> FileReport {
        FileReport {
            path: PathBuf::from(format!("file{}.cup", file_num)),
            waypoints: names
                .iter()
                .map(|name| Waypoint::new(*name, GeoPoint::new(51.0, 7.0), file_num))
                .collect(),
            result: ParseResult {
                file_num,
                source: None,
                stats: ParseStats::new(),
            },
        }
    }

    #[test]
    fn test_collect_waypoints_in_file_order() {
        let reports = vec![report(0, &["Alpha", "Bravo"]), report(1, &["Charlie"])];

        let store = collect_waypoints(&reports);

        assert_eq!(store.len(), 3);
        assert_eq!(store.get(3).unwrap().waypoint.name, "Charlie");
        assert_eq!(store.get(3).unwrap().waypoint.file_num, 1);
        assert_eq!(store.count_by_file().get(&0), Some(&2));
    }

    #[test]
    fn test_json_report_shape() {
        let parsed = ParsedFiles {
            reports: vec![report(0, &["Alpha"])],
            ..Default::default()
        };
        let store = collect_waypoints(&parsed.reports);
        let summary = parsed.summary();

        let report = ImportReport {
            generated_at: Utc::now(),
            summary: &summary,
            files: parsed.reports.iter().map(|r| &r.result).collect(),
            failures: Vec::new(),
            landables: 0,
            waypoints: Some(store.iter().collect()),
        };
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["summary"]["files_processed"], 1);
        assert_eq!(value["waypoints"][0]["id"], 1);
        assert_eq!(value["waypoints"][0]["name"], "Alpha");
        assert!(value["generated_at"].is_string());
    }
}
