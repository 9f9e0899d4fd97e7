//! Test utilities for SeeYou parser testing
//!
//! This module provides sample file content and helper functions used
//! across the parser test modules.

use std::io::Write;
use tempfile::NamedTempFile;

use super::record_parser::{RecordContext, RecordOutcome, parse_record};
use super::state::ParserState;
use super::tokenizer::FieldTokenizer;
use crate::app::models::Waypoint;
use crate::app::services::terrain::{NoTerrain, TerrainLookup};
use crate::config::OverflowPolicy;

mod session_tests;
mod tokenizer_tests;

/// Header naming every column in canonical order
pub const CANONICAL_HEADER: &str = "name,code,country,lat,lon,elev,style,rwdir,rwlen,freq,desc";

/// Helper to create a complete SeeYou file with a task section
pub fn create_test_cup() -> String {
    r#"name,code,country,lat,lon,elev,style,rwdir,rwlen,freq,desc
* Sample waypoints
Alpha,A1,US,5115.900N,00715.900W,458.0m,5,090,1200m,118.500,"Main field"
Bravo,B2,DE,4730.000N,01130.500E,1500F,1,,,,"Church, tower"
Charlie,C3,DE,4800.000N,01200.000E,520m,3,270,250m,,Farm strip

-----Related Tasks-----
"Task 1","Alpha","Bravo","Alpha"
Options,NoStart=12:00:00"#
        .to_string()
}

/// Helper to create a file whose header uses a non-canonical order
pub fn create_reordered_cup() -> String {
    r#"lon,name,lat,style
00715.900W,Alpha,5115.900N,2
01130.500E,Bravo,4730.000N,1"#
        .to_string()
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "{}", content).unwrap();
    temp_file
}

/// Record context with default limits, no terrain and file tag 0
pub fn default_context() -> RecordContext<'static> {
    context_with(&NoTerrain, OverflowPolicy::Truncate)
}

pub fn context_with(
    terrain: &dyn TerrainLookup,
    overflow_policy: OverflowPolicy,
) -> RecordContext<'_> {
    RecordContext {
        tokenizer: FieldTokenizer::default(),
        overflow_policy,
        terrain,
        file_num: 0,
    }
}

/// Parse a single data record with canonical columns
pub fn parse_canonical(line: &str) -> RecordOutcome {
    let mut state = ParserState::new();
    parse_record(line, &mut state, &default_context())
}

/// Parse a single data record that must be accepted
pub fn accept_canonical(line: &str) -> Waypoint {
    match parse_canonical(line) {
        RecordOutcome::Accepted(waypoint) => waypoint,
        other => panic!("expected accepted record for {:?}, got {:?}", line, other),
    }
}

/// Assert two floats agree to within `tolerance`
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {} to be within {} of {}",
        actual,
        tolerance,
        expected
    );
}
