//! Configuration management and validation.
//!
//! Provides the parser configuration: quote character, record limits, and
//! the policies for token overflow and header detection. Configuration can be
//! loaded from a JSON file and is then overridden by command line flags.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_MAX_LINE_LENGTH, DEFAULT_MAX_TOKENS,
    DEFAULT_QUOTE_CHAR,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// What to do with records that carry more fields than `max_tokens`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Keep the first `max_tokens` fields, count and log the record
    #[default]
    Truncate,
    /// Reject the record with `TooManyFields`
    Reject,
}

/// How the header record of a file is located
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderPolicy {
    /// The first non-blank, non-comment record is always the header
    #[default]
    FirstRecord,
    /// The first record is the header only if it names at least one column keyword
    Detect,
    /// Files have no header; canonical column positions are used
    None,
}

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Character toggling quoted spans inside a record
    pub quote_char: char,

    /// Number of fields kept per record
    pub max_tokens: usize,

    /// Records of this many characters or more are rejected
    pub max_line_length: usize,

    /// Handling of records with more than `max_tokens` fields
    pub overflow_policy: OverflowPolicy,

    /// Header record detection
    pub header_policy: HeaderPolicy,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            quote_char: DEFAULT_QUOTE_CHAR,
            max_tokens: DEFAULT_MAX_TOKENS,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            overflow_policy: OverflowPolicy::Truncate,
            header_policy: HeaderPolicy::FirstRecord,
        }
    }
}

impl ParserConfig {
    /// Load configuration from a JSON file; missing keys take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;

        let config: ParserConfig = serde_json::from_str(&content)
            .map_err(|e| Error::config_format(path.display().to_string(), e))?;
        config.validate()?;

        debug!("Loaded configuration from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Default location of the configuration file
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("Could not determine configuration directory"))?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Check limits for consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_tokens == 0 {
            return Err(Error::configuration(
                "max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.max_line_length == 0 {
            return Err(Error::configuration(
                "max_line_length must be greater than 0".to_string(),
            ));
        }

        if self.quote_char == ',' {
            return Err(Error::configuration(
                "quote_char cannot be the field separator ','".to_string(),
            ));
        }

        Ok(())
    }

    /// Use a different quote character
    pub fn with_quote_char(mut self, quote_char: char) -> Self {
        self.quote_char = quote_char;
        self
    }

    /// Set the number of fields kept per record
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the record length bound
    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    /// Reject records with more fields than `max_tokens`
    pub fn with_strict_fields(mut self) -> Self {
        self.overflow_policy = OverflowPolicy::Reject;
        self
    }

    /// Set header detection policy
    pub fn with_header_policy(mut self, header_policy: HeaderPolicy) -> Self {
        self.header_policy = header_policy;
        self
    }
}
