//! Shared components for CLI commands
//!
//! This module contains input resolution, configuration loading, logging
//! setup and the concurrent file parsing used by both commands.

use crate::app::models::Waypoint;
use crate::app::services::seeyou_parser::{ParseResult, ParseStats, SeeYouParser};
use crate::cli::args::ParseOptions;
use crate::config::ParserConfig;
use crate::constants::SEEYOU_FILE_EXTENSION;
use crate::{Error, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

/// Run statistics reported by every command
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    /// Files parsed to the end
    pub files_processed: usize,
    /// Files that could not be read
    pub files_failed: usize,
    /// Record counters over all parsed files
    pub stats: ParseStats,
    /// Wall clock time of the run
    pub processing_time_seconds: f64,
}

impl ImportSummary {
    /// Whether every file was read and no record was rejected
    pub fn is_clean(&self) -> bool {
        self.files_failed == 0 && self.stats.is_clean()
    }
}

/// Parsed content of one input file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub waypoints: Vec<Waypoint>,
    pub result: ParseResult,
}

/// Outcome of parsing a list of files, in input order
#[derive(Debug, Default)]
pub struct ParsedFiles {
    pub reports: Vec<FileReport>,
    pub failures: Vec<(PathBuf, Error)>,
    pub elapsed: Duration,
}

impl ParsedFiles {
    /// Aggregate statistics over all parsed files
    pub fn summary(&self) -> ImportSummary {
        let mut stats = ParseStats::new();
        for report in &self.reports {
            stats.merge(&report.result.stats);
        }

        ImportSummary {
            files_processed: self.reports.len(),
            files_failed: self.failures.len(),
            stats,
            processing_time_seconds: self.elapsed.as_secs_f64(),
        }
    }
}

/// Set up structured logging
pub fn setup_logging(options: &ParseOptions) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = options.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("seeyou_processor={}", log_level)));

    if options.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load the parser configuration (file -> command line overrides)
pub fn load_configuration(options: &ParseOptions) -> Result<ParserConfig> {
    let default_config_path = if options.config_file.is_none() {
        ParserConfig::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &options.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_deref()
            .filter(|path| path.exists()),
    };

    let base = match config_file {
        Some(path) => {
            info!("Using config file: {}", path.display());
            ParserConfig::load(path)?
        }
        None => {
            debug!("No config file found, using defaults");
            ParserConfig::default()
        }
    };

    let config = options.apply_to(base);
    config.validate()?;

    debug!("Effective parser configuration: {:?}", config);
    Ok(config)
}

/// Expand command line paths into the list of files to parse
///
/// Files are taken as given, directories are searched recursively for
/// `.cup` files and anything else is treated as a glob pattern. The order
/// of the result defines the file tags.
pub fn resolve_inputs(paths: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in paths {
        let path = Path::new(input);
        if path.is_file() {
            files.push(path.to_path_buf());
        } else if path.is_dir() {
            files.extend(discover_cup_files(path)?);
        } else if is_glob_pattern(input) {
            let matches = expand_glob(input)?;
            if matches.is_empty() {
                warn!("Pattern matched no files: {}", input);
            }
            files.extend(matches);
        } else {
            return Err(Error::file_not_found(input.clone()));
        }
    }

    if files.is_empty() {
        return Err(Error::invalid_input("No SeeYou files found in the given paths"));
    }

    debug!("Resolved {} input files", files.len());
    Ok(files)
}

/// Find SeeYou files below a directory, sorted by path
pub fn discover_cup_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut cup_files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(|e| {
            Error::directory_traversal(format!("Failed to read {}", dir.display()), e)
        })?;
        let path = entry.path();
        if path.is_file() && is_cup_file(path) {
            cup_files.push(path.to_path_buf());
        }
    }

    // Sort files for consistent file tags
    cup_files.sort();

    debug!(
        "Discovered {} SeeYou files in {}",
        cup_files.len(),
        dir.display()
    );
    Ok(cup_files)
}

fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob::glob(pattern)
        .map_err(|e| Error::invalid_input(format!("Invalid pattern '{}': {}", pattern, e)))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().display().to_string();
            Error::io(format!("Failed to read {}", path), e.into_error())
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

fn is_cup_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SEEYOU_FILE_EXTENSION))
}

/// Parse files concurrently; results keep the input order
///
/// Each file runs on the blocking pool with its own session. A file that
/// cannot be read is recorded as a failure and does not stop the others.
pub async fn parse_files(
    parser: &SeeYouParser,
    files: &[PathBuf],
    concurrency: usize,
    progress: Option<&ProgressBar>,
) -> ParsedFiles {
    let start_time = Instant::now();

    let results: Vec<(PathBuf, Result<FileReport>)> = stream::iter(files.iter().enumerate())
        .map(|(index, path)| {
            let parser = parser.clone();
            let path = path.clone();
            async move {
                let result = parse_one(parser, path.clone(), index as u32).await;
                (path, result)
            }
        })
        .buffered(concurrency.max(1))
        .inspect(|_| {
            if let Some(pb) = progress {
                pb.inc(1);
            }
        })
        .collect()
        .await;

    let mut parsed = ParsedFiles::default();
    for (path, result) in results {
        match result {
            Ok(report) => parsed.reports.push(report),
            Err(e) => {
                error!("Failed to parse {}: {:#}", path.display(), e);
                parsed.failures.push((path, e));
            }
        }
    }
    parsed.elapsed = start_time.elapsed();

    info!(
        "Parsed {} files ({} failed) in {:.2}s",
        parsed.reports.len(),
        parsed.failures.len(),
        parsed.elapsed.as_secs_f64()
    );
    parsed
}

async fn parse_one(parser: SeeYouParser, path: PathBuf, file_num: u32) -> Result<FileReport> {
    let (waypoints, result) = tokio::task::spawn_blocking({
        let path = path.clone();
        move || parser.parse_file_collect(&path, file_num)
    })
    .await
    .map_err(|e| Error::processing_failed(&path, format!("Parser task failed: {}", e)))??;

    Ok(FileReport {
        path,
        waypoints,
        result,
    })
}

/// Resolve inputs, load configuration and parse every file
pub async fn run_parser(options: &ParseOptions, paths: &[String]) -> Result<ParsedFiles> {
    options.validate()?;

    let config = load_configuration(options)?;
    let files = resolve_inputs(paths)?;
    info!("Parsing {} SeeYou files", files.len());

    let parser = SeeYouParser::new(config);
    let progress_bar = (options.show_progress() && files.len() > 1)
        .then(|| create_progress_bar(files.len() as u64, "Parsing waypoint files"));

    let parsed = parse_files(
        &parser,
        &files,
        options.concurrency(),
        progress_bar.as_ref(),
    )
    .await;

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Parsing complete");
    }

    Ok(parsed)
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message.to_string());
    pb
}
