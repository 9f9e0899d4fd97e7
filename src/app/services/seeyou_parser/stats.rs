//! Parsing statistics and result structures for SeeYou processing
//!
//! This module provides types for tracking per-file record outcomes and
//! the rejected records a caller may want to report.

use serde::{Deserialize, Serialize};

use super::record_parser::{RecordOutcome, RejectReason};

/// A rejected record and where it was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// 1-based line number within the file
    pub line_number: usize,

    pub reason: RejectReason,
}

/// Parsing result for one file
#[derive(Debug, Clone, Serialize)]
pub struct ParseResult {
    /// Tag the waypoints of this file carry
    pub file_num: u32,

    /// Source path or label, if known
    pub source: Option<String>,

    pub stats: ParseStats,
}

/// Record outcome counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Total number of records (lines) fed to the parser
    pub total_records: usize,

    /// Records that produced a waypoint
    pub accepted: usize,

    /// Blank, comment, header and task section records
    pub skipped: usize,

    /// Records rejected as malformed
    pub rejected: usize,

    /// Records with more fields than the tokenizer keeps
    pub truncated_records: usize,

    /// Rejected records for reporting
    #[serde(skip_deserializing)]
    pub rejections: Vec<Rejection>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the outcome of record `line_number`
    pub fn record(&mut self, line_number: usize, outcome: &RecordOutcome) {
        self.total_records += 1;
        match outcome {
            RecordOutcome::Accepted(_) => self.accepted += 1,
            RecordOutcome::Skipped(_) => self.skipped += 1,
            RecordOutcome::Rejected(reason) => {
                self.rejected += 1;
                self.rejections.push(Rejection {
                    line_number,
                    reason: *reason,
                });
            }
        }
    }

    /// Accepted records as a percentage of accepted plus rejected records
    pub fn success_rate(&self) -> f64 {
        let candidates = self.accepted + self.rejected;
        if candidates == 0 {
            0.0
        } else {
            (self.accepted as f64 / candidates as f64) * 100.0
        }
    }

    /// Whether no record was rejected
    pub fn is_clean(&self) -> bool {
        self.rejected == 0
    }

    /// Add the counters of another file; rejections are appended
    pub fn merge(&mut self, other: &ParseStats) {
        self.total_records += other.total_records;
        self.accepted += other.accepted;
        self.skipped += other.skipped;
        self.rejected += other.rejected;
        self.truncated_records += other.truncated_records;
        self.rejections.extend(other.rejections.iter().cloned());
    }
}
