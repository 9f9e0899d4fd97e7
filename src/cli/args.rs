//! Command-line argument definitions for the SeeYou processor
//!
//! This module defines the CLI interface using the clap derive API. Parser
//! options shared by every command live in [`ParseOptions`] and are
//! flattened into each subcommand.

use crate::config::{HeaderPolicy, ParserConfig};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the SeeYou waypoint processor
///
/// Imports gliding waypoint files in the SeeYou (`.cup`) format and reports
/// the accepted waypoints and rejected records.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seeyou-processor",
    version,
    about = "Import and validate SeeYou (.cup) gliding waypoint files",
    long_about = "Parses SeeYou waypoint files into structured waypoints. Handles header-driven \
                  column orders, coordinate and unit micro-formats, landable classification from \
                  style codes and runway lengths, and reports every rejected record with its reason."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Import waypoint files and print a summary
    Import(ImportArgs),
    /// Check waypoint files and report every rejected record
    Validate(ValidateArgs),
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// Files, directories or glob patterns to import
    ///
    /// Directories are searched recursively for `.cup` files. Each file is
    /// tagged with its position in the resolved list.
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<String>,

    #[command(flatten)]
    pub options: ParseOptions,

    /// Output format for the summary
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the summary"
    )]
    pub output_format: OutputFormat,

    /// Print every imported waypoint
    #[arg(short = 'l', long = "list", help = "Print every imported waypoint")]
    pub list: bool,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Files, directories or glob patterns to validate
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<String>,

    #[command(flatten)]
    pub options: ParseOptions,

    /// Output format for the report
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the report"
    )]
    pub output_format: OutputFormat,
}

/// Parser and runtime options shared by all commands
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ParseOptions {
    /// Configuration file path
    ///
    /// If not specified, `<config dir>/seeyou-processor/config.json` is used
    /// when it exists. Command line options override file values.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config_file: Option<PathBuf>,

    /// Character that delimits quoted fields
    #[arg(long = "quote-char", value_name = "CHAR")]
    pub quote_char: Option<char>,

    /// Number of fields kept per record
    #[arg(long = "max-fields", value_name = "N")]
    pub max_fields: Option<usize>,

    /// Reject records with more fields than `--max-fields` instead of truncating
    #[arg(long = "strict-fields")]
    pub strict_fields: bool,

    /// How the first record of a file is treated
    #[arg(long = "header", value_enum, value_name = "POLICY")]
    pub header: Option<HeaderArg>,

    /// Maximum number of files parsed at the same time
    ///
    /// Defaults to the number of CPU cores.
    #[arg(long = "max-concurrent", value_name = "N")]
    pub max_concurrent: Option<usize>,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and hides progress bars.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress all output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON output for machine processing
    Json,
}

/// Header handling on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HeaderArg {
    /// The first record is always the header
    First,
    /// The first record is the header only if it names a known column
    Detect,
    /// Files have no header
    None,
}

impl From<HeaderArg> for HeaderPolicy {
    fn from(arg: HeaderArg) -> Self {
        match arg {
            HeaderArg::First => HeaderPolicy::FirstRecord,
            HeaderArg::Detect => HeaderPolicy::Detect,
            HeaderArg::None => HeaderPolicy::None,
        }
    }
}

impl Args {
    /// Get the command to execute
    pub fn get_command(&self) -> Option<&Commands> {
        self.command.as_ref()
    }
}

impl Commands {
    pub fn options(&self) -> &ParseOptions {
        match self {
            Commands::Import(args) => &args.options,
            Commands::Validate(args) => &args.options,
        }
    }
}

impl ParseOptions {
    /// Validate option values that clap cannot check
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent == Some(0) {
            return Err(Error::configuration(
                "max-concurrent must be at least 1".to_string(),
            ));
        }

        if self.max_fields == Some(0) {
            return Err(Error::configuration(
                "max-fields must be at least 1".to_string(),
            ));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::file_not_found(config_file.display().to_string()));
            }
        }

        Ok(())
    }

    /// Apply command line overrides on top of a file or default configuration
    pub fn apply_to(&self, mut config: ParserConfig) -> ParserConfig {
        if let Some(quote_char) = self.quote_char {
            config = config.with_quote_char(quote_char);
        }
        if let Some(max_fields) = self.max_fields {
            config = config.with_max_tokens(max_fields);
        }
        if self.strict_fields {
            config = config.with_strict_fields();
        }
        if let Some(header) = self.header {
            config = config.with_header_policy(header.into());
        }
        config
    }

    /// Number of files parsed at the same time
    pub fn concurrency(&self) -> usize {
        self.max_concurrent.unwrap_or_else(num_cpus::get).max(1)
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
