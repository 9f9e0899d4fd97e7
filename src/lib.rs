//! SeeYou Processor Library
//!
//! A Rust library for importing gliding waypoint files in the SeeYou (`.cup`)
//! format into structured waypoint records.
//!
//! This library provides tools for:
//! - Tokenizing quote-aware comma separated records
//! - Mapping header-driven column orders onto the fixed SeeYou fields
//! - Parsing the coordinate, elevation, distance and style micro-formats
//! - Classifying landable sites from style codes and runway lengths
//! - Feeding finished waypoints into a caller-owned collection sink
//! - Per-record outcomes with explicit skip and rejection reasons

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod seeyou_parser;
        pub mod terrain;
        pub mod waypoint_store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

use std::path::PathBuf;

// Re-export commonly used types
pub use app::models::{GeoPoint, Waypoint, WaypointFlags};
pub use config::ParserConfig;

/// Result type alias for the SeeYou processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for file, configuration and command level failures
///
/// Individual records never produce an `Error`; they are reported through
/// [`app::services::seeyou_parser::RecordOutcome`] instead.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Configuration file could not be decoded
    #[error("Invalid configuration file '{path}': {source}")]
    ConfigFormat {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Invalid command line input (bad glob, empty path list, ...)
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Parsing a file failed as a whole
    #[error("Failed to process {}: {reason}", .path.display())]
    ProcessingFailed { path: PathBuf, reason: String },

    /// One or more records were rejected during validation
    #[error("Validation failed: {rejected} rejected records in {files} file(s)")]
    ValidationFailed { rejected: usize, files: usize },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a configuration file format error
    pub fn config_format(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::ConfigFormat {
            path: path.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create a whole-file processing failure
    pub fn processing_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ProcessingFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a validation failure summary error
    pub fn validation_failed(rejected: usize, files: usize) -> Self {
        Self::ValidationFailed { rejected, files }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}
