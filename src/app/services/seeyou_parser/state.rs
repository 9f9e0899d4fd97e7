//! Per-file parser state
//!
//! Each file session owns exactly one [`ParserState`]. Two files parsed at
//! the same time use two independent states.

use super::column_mapping::ColumnMap;

/// Mutable state carried from record to record within one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserState {
    /// Column positions for data records
    pub column_map: ColumnMap,

    /// Set once the task section marker was seen; all later records are skipped
    pub ignore_rest: bool,

    header_consumed: bool,
}

impl ParserState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the column mapping of a header record
    ///
    /// Also clears `ignore_rest`, so a state can be reused for the next file.
    pub fn apply_header<S: AsRef<str>>(&mut self, tokens: &[S]) {
        self.column_map = ColumnMap::from_header(tokens);
        self.ignore_rest = false;
        self.header_consumed = true;
    }

    /// Mark the header slot as used without changing the column mapping
    pub fn skip_header(&mut self) {
        self.header_consumed = true;
    }

    /// Whether the header slot of this file has been used
    pub fn header_consumed(&self) -> bool {
        self.header_consumed
    }

    /// Whether the task section marker has been seen
    pub fn ignores_rest(&self) -> bool {
        self.ignore_rest
    }

    /// Back to canonical columns, ready for a new file
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
