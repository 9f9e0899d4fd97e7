//! Individual record parsing for SeeYou files
//!
//! This module turns one line plus the running [`ParserState`] into a
//! [`RecordOutcome`]. Header records are routed to the column mapping by the
//! session before they reach [`parse_record`].

use serde::Serialize;

use super::angle::parse_angle;
use super::column_mapping::{Column, ColumnMap};
use super::field_parsers::{
    ValueDomain, classify_style, parse_runway_direction, parse_unit_value,
};
use super::state::ParserState;
use super::tokenizer::{FieldTokenizer, TokenizedRecord};
use crate::app::models::{GeoPoint, Waypoint, WaypointFlags};
use crate::app::services::terrain::TerrainLookup;
use crate::config::OverflowPolicy;
use crate::constants::{
    AIRPORT_MIN_RUNWAY_LENGTH, COMMENT_MARKER, DEGREE_MARK, EOF_SENTINEL,
    LANDPOINT_MIN_RUNWAY_LENGTH, SECTION_END_MARKER,
};

/// Why a record produced no waypoint without being an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// Empty or whitespace-only line
    Blank,
    /// Line starting with `*`
    Comment,
    /// End-of-file sentinel byte
    EndOfFile,
    /// Header record naming the columns
    Header,
    /// The task section marker itself
    SectionEnd,
    /// Any record after the task section marker
    AfterSectionEnd,
}

/// Why a record was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
pub enum RejectReason {
    #[error("record exceeds the maximum line length")]
    LineTooLong,

    #[error("record lacks the name, latitude or longitude field")]
    MissingRequiredField,

    #[error("latitude or longitude is malformed")]
    InvalidCoordinate,

    #[error("waypoint name is empty")]
    EmptyName,

    #[error("record has more fields than allowed")]
    TooManyFields,
}

/// Result of feeding one record to the parser
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Accepted(Waypoint),
    Skipped(SkipReason),
    Rejected(RejectReason),
}

impl RecordOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, RecordOutcome::Accepted(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, RecordOutcome::Skipped(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, RecordOutcome::Rejected(_))
    }

    /// The accepted waypoint, if any
    pub fn into_waypoint(self) -> Option<Waypoint> {
        match self {
            RecordOutcome::Accepted(waypoint) => Some(waypoint),
            _ => None,
        }
    }
}

/// Everything a record needs besides the line and the mutable state
#[derive(Clone, Copy)]
pub struct RecordContext<'a> {
    pub tokenizer: FieldTokenizer,
    pub overflow_policy: OverflowPolicy,
    pub terrain: &'a dyn TerrainLookup,
    pub file_num: u32,
}

/// Skip reason for blank lines, comments and the end-of-file sentinel
pub fn skip_reason(line: &str) -> Option<SkipReason> {
    if line.trim().is_empty() {
        Some(SkipReason::Blank)
    } else if line.starts_with(EOF_SENTINEL) {
        Some(SkipReason::EndOfFile)
    } else if line.starts_with(COMMENT_MARKER) {
        Some(SkipReason::Comment)
    } else {
        None
    }
}

/// Task section handling for a non-blank, non-comment record
///
/// Once the marker has been seen every record is skipped; the marker record
/// itself switches the state.
pub fn section_skip(line: &str, state: &mut ParserState) -> Option<SkipReason> {
    if state.ignore_rest {
        return Some(SkipReason::AfterSectionEnd);
    }

    if line.starts_with(SECTION_END_MARKER) {
        state.ignore_rest = true;
        return Some(SkipReason::SectionEnd);
    }

    None
}

/// Parse one data record
///
/// Blank lines, comments and the end-of-file sentinel are skipped first.
/// After the task section marker every record is skipped.
pub fn parse_record(
    line: &str,
    state: &mut ParserState,
    context: &RecordContext<'_>,
) -> RecordOutcome {
    if let Some(reason) = skip_reason(line).or_else(|| section_skip(line, state)) {
        return RecordOutcome::Skipped(reason);
    }

    match context.tokenizer.tokenize(line) {
        Ok(record) => parse_fields(&record, &state.column_map, context),
        Err(reason) => RecordOutcome::Rejected(reason),
    }
}

/// Turn the fields of a data record into an outcome
pub fn parse_fields(
    record: &TokenizedRecord,
    columns: &ColumnMap,
    context: &RecordContext<'_>,
) -> RecordOutcome {
    if record.is_truncated() && context.overflow_policy == OverflowPolicy::Reject {
        return RecordOutcome::Rejected(RejectReason::TooManyFields);
    }

    match build_waypoint(record, columns, context.terrain, context.file_num) {
        Ok(waypoint) => RecordOutcome::Accepted(waypoint),
        Err(reason) => RecordOutcome::Rejected(reason),
    }
}

/// Build a waypoint from the fields of a data record
pub fn build_waypoint(
    record: &TokenizedRecord,
    columns: &ColumnMap,
    terrain: &dyn TerrainLookup,
    file_num: u32,
) -> Result<Waypoint, RejectReason> {
    let field = |column: Column| record.get(columns.index(column));

    let name = field(Column::Name).ok_or(RejectReason::MissingRequiredField)?;
    let latitude_token = field(Column::Latitude).ok_or(RejectReason::MissingRequiredField)?;
    let longitude_token = field(Column::Longitude).ok_or(RejectReason::MissingRequiredField)?;

    // Latitude (e.g. 5115.900N), longitude (e.g. 00715.900W)
    let latitude = parse_angle(latitude_token, true).ok_or(RejectReason::InvalidCoordinate)?;
    let longitude = parse_angle(longitude_token, false).ok_or(RejectReason::InvalidCoordinate)?;
    let location = GeoPoint::new(latitude, longitude).normalized();

    if name.is_empty() {
        return Err(RejectReason::EmptyName);
    }

    let mut waypoint = Waypoint::new(name, location, file_num);

    // Elevation (e.g. 458.0m), terrain height when missing
    waypoint.altitude = field(Column::Elevation)
        .and_then(|token| parse_unit_value(token, ValueDomain::Elevation))
        .or_else(|| terrain.elevation_at(location));

    // Style (e.g. 5)
    if let Some(flags) = field(Column::Style).and_then(classify_style) {
        waypoint.flags = flags;
    }

    // Runway length (e.g. 546.0m)
    waypoint.runway_length = field(Column::RunwayLength)
        .and_then(|token| parse_unit_value(token, ValueDomain::Distance))
        .unwrap_or(0.0);
    classify_by_runway_length(&mut waypoint.flags, waypoint.runway_length);

    let runway_direction = field(Column::RunwayDirection).filter(|token| !token.is_empty());

    if waypoint.is_landable() {
        if let Some(frequency) = field(Column::Frequency) {
            waypoint.append_comment(frequency);
        }
        if let Some(direction) = runway_direction {
            waypoint.append_comment(&format!("{}{}", direction, DEGREE_MARK));
        }
        if let Some(length) = field(Column::RunwayLength) {
            waypoint.append_comment(length);
        }
    }

    waypoint.runway_direction = runway_direction.and_then(parse_runway_direction);

    if let Some(description) = field(Column::Description) {
        waypoint.append_comment(description);
    }

    Ok(waypoint)
}

/// Promote sites the style code did not mark as airport by runway length
///
/// (100, 300] meters makes a landpoint, anything longer an airport.
pub fn classify_by_runway_length(flags: &mut WaypointFlags, runway_length: f64) {
    if flags.airport {
        return;
    }

    if runway_length > LANDPOINT_MIN_RUNWAY_LENGTH && runway_length <= AIRPORT_MIN_RUNWAY_LENGTH {
        flags.land_point = true;
    }
    if runway_length > AIRPORT_MIN_RUNWAY_LENGTH {
        flags.airport = true;
    }
}
