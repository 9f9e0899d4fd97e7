//! Quote-aware record tokenizer
//!
//! Splits a record on commas that are not inside a quoted span. The quote
//! character toggles the span and is itself dropped; every field is trimmed.

use super::record_parser::RejectReason;
use crate::config::ParserConfig;
use crate::constants::{DEFAULT_MAX_LINE_LENGTH, DEFAULT_MAX_TOKENS, DEFAULT_QUOTE_CHAR};

/// Fields of one record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenizedRecord {
    /// Kept fields, at most `max_tokens`
    pub tokens: Vec<String>,

    /// Number of fields dropped because the record exceeded `max_tokens`
    pub overflow: usize,
}

impl TokenizedRecord {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Field at `index`, if the record has that many fields
    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Whether fields were dropped
    pub fn is_truncated(&self) -> bool {
        self.overflow > 0
    }
}

/// Record tokenizer with fixed quote character and limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTokenizer {
    pub quote_char: char,
    pub max_tokens: usize,
    pub max_line_length: usize,
}

impl Default for FieldTokenizer {
    fn default() -> Self {
        Self {
            quote_char: DEFAULT_QUOTE_CHAR,
            max_tokens: DEFAULT_MAX_TOKENS,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

impl FieldTokenizer {
    pub fn from_config(config: &ParserConfig) -> Self {
        Self {
            quote_char: config.quote_char,
            max_tokens: config.max_tokens,
            max_line_length: config.max_line_length,
        }
    }

    /// Split `line` into fields
    ///
    /// Fails with [`RejectReason::LineTooLong`] when the line has
    /// `max_line_length` characters or more.
    pub fn tokenize(&self, line: &str) -> Result<TokenizedRecord, RejectReason> {
        if line.chars().count() >= self.max_line_length {
            return Err(RejectReason::LineTooLong);
        }

        let mut record = TokenizedRecord::default();
        let mut current = String::new();
        let mut in_quote = false;

        for c in line.chars() {
            if c == self.quote_char {
                in_quote = !in_quote;
            } else if c == ',' && !in_quote {
                self.push_field(&mut record, &current);
                current.clear();
            } else {
                current.push(c);
            }
        }
        self.push_field(&mut record, &current);

        Ok(record)
    }

    fn push_field(&self, record: &mut TokenizedRecord, field: &str) {
        if record.tokens.len() < self.max_tokens {
            record.tokens.push(field.trim().to_string());
        } else {
            record.overflow += 1;
        }
    }
}

/// Split `line` with the default record length bound
pub fn tokenize(
    line: &str,
    quote_char: char,
    max_tokens: usize,
) -> Result<TokenizedRecord, RejectReason> {
    FieldTokenizer {
        quote_char,
        max_tokens,
        max_line_length: DEFAULT_MAX_LINE_LENGTH,
    }
    .tokenize(line)
}
