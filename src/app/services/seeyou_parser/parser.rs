//! Core SeeYou parser implementation
//!
//! This module provides file sessions: line numbering, header routing,
//! forwarding of accepted waypoints to a sink, and statistics. Each session
//! owns its own [`ParserState`], so files can be parsed concurrently.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::column_mapping::ColumnMap;
use super::record_parser::{
    RecordContext, RecordOutcome, RejectReason, SkipReason, parse_fields, section_skip,
    skip_reason,
};
use super::state::ParserState;
use super::stats::{ParseResult, ParseStats};
use super::tokenizer::{FieldTokenizer, TokenizedRecord};
use crate::app::models::Waypoint;
use crate::app::services::terrain::{NoTerrain, TerrainLookup};
use crate::app::services::waypoint_store::WaypointSink;
use crate::config::{HeaderPolicy, ParserConfig};
use crate::{Error, Result};

const UTF8_BOM: char = '\u{feff}';

/// SeeYou waypoint file parser
///
/// Holds the configuration and the terrain source shared by all sessions.
/// Cloning is cheap.
#[derive(Debug, Clone)]
pub struct SeeYouParser {
    config: ParserConfig,
    terrain: Arc<dyn TerrainLookup>,
}

impl SeeYouParser {
    /// Create a parser without terrain data
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            terrain: Arc::new(NoTerrain),
        }
    }

    /// Use `terrain` for records without a usable elevation
    pub fn with_terrain(mut self, terrain: Arc<dyn TerrainLookup>) -> Self {
        self.terrain = terrain;
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Start a session for one file
    pub fn session(&self, file_num: u32) -> ParseSession<'_> {
        ParseSession::new(&self.config, self.terrain.as_ref(), file_num)
    }

    /// Parse in-memory file content
    pub fn parse_str<S: WaypointSink + ?Sized>(
        &self,
        content: &str,
        file_num: u32,
        sink: &mut S,
    ) -> ParseResult {
        let mut session = self.session(file_num);
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

        for line in content.lines() {
            session.feed_line_into(line, sink);
        }

        session.finish(None)
    }

    /// Parse a file from any buffered reader
    ///
    /// Lines are decoded as UTF-8, replacing invalid sequences.
    pub fn parse_reader<R: BufRead, S: WaypointSink + ?Sized>(
        &self,
        mut reader: R,
        file_num: u32,
        source: Option<String>,
        sink: &mut S,
    ) -> Result<ParseResult> {
        let label = source.clone().unwrap_or_else(|| "<input>".to_string());
        let mut session = self.session(file_num);
        let mut buffer = Vec::new();

        loop {
            buffer.clear();
            let read = reader
                .read_until(b'\n', &mut buffer)
                .map_err(|e| Error::io(format!("Failed to read {}", label), e))?;
            if read == 0 {
                break;
            }

            let decoded = decode_line(&buffer);
            let line = if session.line_number() == 0 {
                decoded.strip_prefix(UTF8_BOM).unwrap_or(decoded.as_str())
            } else {
                decoded.as_str()
            };
            session.feed_line_into(line, sink);
        }

        Ok(session.finish(source))
    }

    /// Parse a SeeYou file from disk
    pub fn parse_file<S: WaypointSink + ?Sized>(
        &self,
        file_path: &Path,
        file_num: u32,
        sink: &mut S,
    ) -> Result<ParseResult> {
        info!("Parsing SeeYou file: {}", file_path.display());

        if !file_path.exists() {
            return Err(Error::file_not_found(file_path.display().to_string()));
        }

        let file = File::open(file_path)
            .map_err(|e| Error::io(format!("Failed to open {}", file_path.display()), e))?;

        self.parse_reader(
            BufReader::new(file),
            file_num,
            Some(file_path.display().to_string()),
            sink,
        )
    }

    /// Parse a file and collect its waypoints
    pub fn parse_file_collect(
        &self,
        file_path: &Path,
        file_num: u32,
    ) -> Result<(Vec<Waypoint>, ParseResult)> {
        let mut waypoints = Vec::new();
        let result = self.parse_file(file_path, file_num, &mut waypoints)?;
        Ok((waypoints, result))
    }
}

/// Parsing session for a single file
///
/// Lines must be fed in file order; the first non-blank, non-comment line is
/// treated as the header according to the configured [`HeaderPolicy`].
pub struct ParseSession<'a> {
    config: &'a ParserConfig,
    tokenizer: FieldTokenizer,
    terrain: &'a dyn TerrainLookup,
    state: ParserState,
    file_num: u32,
    line_number: usize,
    stats: ParseStats,
}

impl<'a> ParseSession<'a> {
    pub fn new(config: &'a ParserConfig, terrain: &'a dyn TerrainLookup, file_num: u32) -> Self {
        let mut state = ParserState::new();
        if config.header_policy == HeaderPolicy::None {
            state.skip_header();
        }

        Self {
            config,
            tokenizer: FieldTokenizer::from_config(config),
            terrain,
            state,
            file_num,
            line_number: 0,
            stats: ParseStats::new(),
        }
    }

    /// Number of lines fed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Feed the next line and return its outcome
    pub fn feed_line(&mut self, line: &str) -> RecordOutcome {
        self.line_number += 1;
        let outcome = self.process_line(line);
        self.stats.record(self.line_number, &outcome);

        match &outcome {
            RecordOutcome::Rejected(reason) => {
                debug!("Rejected record {}: {}", self.line_number, reason)
            }
            RecordOutcome::Skipped(SkipReason::SectionEnd) => {
                debug!(
                    "Task section starts at line {}, ignoring the rest",
                    self.line_number
                )
            }
            _ => {}
        }

        outcome
    }

    /// Feed the next line, handing an accepted waypoint to `sink`
    ///
    /// Returns the rejection reason if the record was rejected.
    pub fn feed_line_into<S: WaypointSink + ?Sized>(
        &mut self,
        line: &str,
        sink: &mut S,
    ) -> Option<RejectReason> {
        match self.feed_line(line) {
            RecordOutcome::Accepted(waypoint) => {
                sink.add_waypoint(waypoint);
                None
            }
            RecordOutcome::Skipped(_) => None,
            RecordOutcome::Rejected(reason) => Some(reason),
        }
    }

    /// End the session and return its statistics
    pub fn finish(self, source: Option<String>) -> ParseResult {
        let label = source.as_deref().unwrap_or("<input>");
        info!(
            "Parsed {} waypoints from {} records in {}",
            self.stats.accepted, self.stats.total_records, label
        );
        if self.stats.rejected > 0 {
            warn!(
                "{} records rejected in {} ({:.1}% success)",
                self.stats.rejected,
                label,
                self.stats.success_rate()
            );
        }

        ParseResult {
            file_num: self.file_num,
            source,
            stats: self.stats,
        }
    }

    fn process_line(&mut self, line: &str) -> RecordOutcome {
        if let Some(reason) = skip_reason(line) {
            return RecordOutcome::Skipped(reason);
        }

        if !self.state.header_consumed() {
            if let Some(outcome) = self.process_header(line) {
                return outcome;
            }
        }

        if let Some(reason) = section_skip(line, &mut self.state) {
            return RecordOutcome::Skipped(reason);
        }

        let record = match self.tokenizer.tokenize(line) {
            Ok(record) => record,
            Err(reason) => return RecordOutcome::Rejected(reason),
        };
        self.note_overflow(&record);

        let context = RecordContext {
            tokenizer: self.tokenizer,
            overflow_policy: self.config.overflow_policy,
            terrain: self.terrain,
            file_num: self.file_num,
        };
        parse_fields(&record, &self.state.column_map, &context)
    }

    /// Handle the header slot; `None` means the line is data after all
    fn process_header(&mut self, line: &str) -> Option<RecordOutcome> {
        let record = match self.tokenizer.tokenize(line) {
            Ok(record) => record,
            Err(reason) => {
                self.state.skip_header();
                return Some(RecordOutcome::Rejected(reason));
            }
        };

        let keywords = ColumnMap::keyword_count(&record.tokens);
        if self.config.header_policy == HeaderPolicy::Detect && keywords == 0 {
            debug!("First record names no columns, using canonical column order");
            self.state.skip_header();
            return None;
        }

        self.note_overflow(&record);
        self.state.apply_header(&record.tokens);
        debug!(
            "Header at line {} names {} columns: {:?}",
            self.line_number, keywords, self.state.column_map
        );

        Some(RecordOutcome::Skipped(SkipReason::Header))
    }

    fn note_overflow(&mut self, record: &TokenizedRecord) {
        if record.is_truncated() {
            self.stats.truncated_records += 1;
            warn!(
                "Record {} has {} fields beyond the limit of {}",
                self.line_number, record.overflow, self.tokenizer.max_tokens
            );
        }
    }
}

/// Decode one raw line, dropping the line terminator
fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
