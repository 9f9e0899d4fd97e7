//! Tests for file sessions, header policies and statistics

use super::*;
use crate::ParserConfig;
use crate::app::models::GeoPoint;
use crate::app::services::seeyou_parser::parser::{ParseSession, SeeYouParser};
use crate::app::services::seeyou_parser::record_parser::{RejectReason, SkipReason};
use crate::app::services::waypoint_store::WaypointStore;
use crate::config::HeaderPolicy;
use std::io::Cursor;
use std::sync::Arc;
use std::thread;

#[test]
fn test_parse_complete_file() {
    let parser = SeeYouParser::new(ParserConfig::default());
    let mut waypoints = Vec::new();

    let result = parser.parse_str(&create_test_cup(), 3, &mut waypoints);

    let names: Vec<&str> = waypoints.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Bravo", "Charlie"]);
    assert!(waypoints.iter().all(|w| w.file_num == 3));
    assert_eq!(waypoints[1].comment, "Church, tower");

    let stats = &result.stats;
    assert_eq!(stats.total_records, 9);
    assert_eq!(stats.accepted, 3);
    assert_eq!(stats.rejected, 0);
    assert_eq!(stats.skipped, 6);
    assert!(stats.is_clean());
    assert_eq!(result.file_num, 3);
}

#[test]
fn test_session_outcomes() {
    let config = ParserConfig::default();
    let mut session = ParseSession::new(&config, &NoTerrain, 0);

    assert_eq!(
        session.feed_line("* leading comment"),
        RecordOutcome::Skipped(SkipReason::Comment)
    );
    assert_eq!(
        session.feed_line(CANONICAL_HEADER),
        RecordOutcome::Skipped(SkipReason::Header)
    );
    assert!(session.state().header_consumed());
    assert!(session.feed_line("Alpha,,,5115.900N,00715.900W").is_accepted());
    assert_eq!(
        session.feed_line("Bad,,,5115.900N"),
        RecordOutcome::Rejected(RejectReason::MissingRequiredField)
    );
    assert_eq!(session.line_number(), 4);

    let result = session.finish(Some("test.cup".to_string()));
    assert_eq!(result.stats.rejections.len(), 1);
    assert_eq!(result.stats.rejections[0].line_number, 4);
    assert_eq!(result.source.as_deref(), Some("test.cup"));
}

#[test]
fn test_first_record_is_always_header() {
    let parser = SeeYouParser::new(ParserConfig::default());
    let mut waypoints = Vec::new();

    let content = "Alpha,,,5115.900N,00715.900W\nBravo,,,4730.000N,01130.500E";
    let result = parser.parse_str(content, 0, &mut waypoints);

    assert_eq!(waypoints.len(), 1);
    assert_eq!(waypoints[0].name, "Bravo");
    assert_eq!(result.stats.skipped, 1);
}

#[test]
fn test_detect_header_policy() {
    let config = ParserConfig::default().with_header_policy(HeaderPolicy::Detect);
    let parser = SeeYouParser::new(config);

    let mut waypoints = Vec::new();
    let content = "Alpha,,,5115.900N,00715.900W\nBravo,,,4730.000N,01130.500E";
    parser.parse_str(content, 0, &mut waypoints);
    assert_eq!(waypoints.len(), 2);

    let mut waypoints = Vec::new();
    parser.parse_str(&create_reordered_cup(), 0, &mut waypoints);
    assert_eq!(waypoints.len(), 2);
    assert_eq!(waypoints[0].name, "Alpha");
}

#[test]
fn test_no_header_policy() {
    let config = ParserConfig::default().with_header_policy(HeaderPolicy::None);
    let parser = SeeYouParser::new(config);
    let mut waypoints = Vec::new();

    let result = parser.parse_str(&create_test_cup(), 0, &mut waypoints);

    // The header line is parsed as data and rejected
    assert_eq!(waypoints.len(), 3);
    assert_eq!(result.stats.rejected, 1);
    assert_eq!(
        result.stats.rejections[0].reason,
        RejectReason::InvalidCoordinate
    );
}

#[test]
fn test_reordered_file() {
    let parser = SeeYouParser::new(ParserConfig::default());
    let mut waypoints = Vec::new();

    parser.parse_str(&create_reordered_cup(), 0, &mut waypoints);

    assert_eq!(waypoints.len(), 2);
    assert!(waypoints[0].flags.airport);
    assert_close(waypoints[1].location.longitude, 11.50833, 1e-5);
}

#[test]
fn test_too_long_header_consumes_slot() {
    let parser = SeeYouParser::new(ParserConfig::default());
    let mut waypoints = Vec::new();

    let content = format!("{}\nAlpha,,,5115.900N,00715.900W", "x".repeat(300));
    let result = parser.parse_str(&content, 0, &mut waypoints);

    assert_eq!(waypoints.len(), 1);
    assert_eq!(result.stats.rejections[0].reason, RejectReason::LineTooLong);
}

#[test]
fn test_truncated_records_are_counted() {
    let parser = SeeYouParser::new(ParserConfig::default().with_max_tokens(5));
    let mut waypoints = Vec::new();

    let content = format!("{}\nAlpha,,,5115.900N,00715.900W,458m,5", CANONICAL_HEADER);
    let result = parser.parse_str(&content, 0, &mut waypoints);

    assert_eq!(waypoints.len(), 1);
    assert_eq!(waypoints[0].altitude, None);
    assert_eq!(result.stats.truncated_records, 2);
}

#[test]
fn test_strict_fields_reject_overflow() {
    let config = ParserConfig::default()
        .with_max_tokens(5)
        .with_strict_fields();
    let parser = SeeYouParser::new(config);
    let mut waypoints = Vec::new();

    let content = "name,code,country,lat,lon\nAlpha,,,5115.900N,00715.900W,458m";
    let result = parser.parse_str(content, 0, &mut waypoints);

    assert!(waypoints.is_empty());
    assert_eq!(
        result.stats.rejections[0].reason,
        RejectReason::TooManyFields
    );
}

#[test]
fn test_custom_quote_char() {
    let parser = SeeYouParser::new(ParserConfig::default().with_quote_char('\''));
    let mut waypoints = Vec::new();

    let content = format!("{}\n'Alpha, North',,,5115.900N,00715.900W", CANONICAL_HEADER);
    parser.parse_str(&content, 0, &mut waypoints);

    assert_eq!(waypoints[0].name, "Alpha, North");
}

#[test]
fn test_terrain_shared_by_sessions() {
    let parser = SeeYouParser::new(ParserConfig::default())
        .with_terrain(Arc::new(|_location: GeoPoint| Some(100.0)));
    let mut waypoints = Vec::new();

    let content = format!("{}\nAlpha,,,5115.900N,00715.900W", CANONICAL_HEADER);
    parser.parse_str(&content, 0, &mut waypoints);

    assert_eq!(waypoints[0].altitude, Some(100.0));
}

#[test]
fn test_concurrent_sessions_are_independent() {
    let parser = SeeYouParser::new(ParserConfig::default());

    let handles: Vec<_> = [create_test_cup(), create_reordered_cup()]
        .into_iter()
        .enumerate()
        .map(|(file_num, content)| {
            let parser = parser.clone();
            thread::spawn(move || {
                let mut waypoints = Vec::new();
                parser.parse_str(&content, file_num as u32, &mut waypoints);
                waypoints
            })
        })
        .collect();

    let results: Vec<Vec<_>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results[0].len(), 3);
    assert_eq!(results[1].len(), 2);
    assert!(results[1].iter().all(|w| w.file_num == 1));
    assert_close(results[1][0].location.longitude, -7.265, 1e-9);
}

#[test]
fn test_sections_do_not_leak_between_files() {
    let parser = SeeYouParser::new(ParserConfig::default());
    let mut store = WaypointStore::new();

    parser.parse_str(&create_test_cup(), 0, &mut store);
    let result = parser.parse_str(&create_reordered_cup(), 1, &mut store);

    assert_eq!(result.stats.accepted, 2);
    assert_eq!(store.len(), 5);
    assert_eq!(store.get(4).unwrap().waypoint.file_num, 1);
}

#[test]
fn test_parse_reader_handles_crlf_and_bom() {
    let parser = SeeYouParser::new(ParserConfig::default());
    let mut waypoints = Vec::new();

    let content = format!(
        "\u{feff}{}\r\nAlpha,,,5115.900N,00715.900W\r\n",
        CANONICAL_HEADER
    );
    let result = parser
        .parse_reader(Cursor::new(content.into_bytes()), 0, None, &mut waypoints)
        .unwrap();

    assert_eq!(result.stats.total_records, 2);
    assert_eq!(waypoints.len(), 1);
    assert_eq!(waypoints[0].name, "Alpha");
}

#[test]
fn test_parse_reader_replaces_invalid_utf8() {
    let parser = SeeYouParser::new(ParserConfig::default());
    let mut waypoints = Vec::new();

    let mut bytes = format!("{}\n", CANONICAL_HEADER).into_bytes();
    bytes.extend_from_slice(b"M\xfcnster,,,5157.000N,00737.000E\n");
    parser
        .parse_reader(Cursor::new(bytes), 0, None, &mut waypoints)
        .unwrap();

    assert_eq!(waypoints.len(), 1);
    assert!(waypoints[0].name.starts_with('M'));
}

#[test]
fn test_parse_file() {
    let temp_file = create_temp_file(&create_test_cup());
    let parser = SeeYouParser::new(ParserConfig::default());

    let (waypoints, result) = parser.parse_file_collect(temp_file.path(), 7).unwrap();

    assert_eq!(waypoints.len(), 3);
    assert_eq!(result.file_num, 7);
    assert!(result.source.is_some());
}

#[test]
fn test_parse_missing_file() {
    let parser = SeeYouParser::new(ParserConfig::default());
    let result = parser.parse_file_collect(std::path::Path::new("/nonexistent/file.cup"), 0);

    assert!(matches!(result, Err(crate::Error::FileNotFound { .. })));
}

#[test]
fn test_stats_merge_and_rate() {
    let parser = SeeYouParser::new(ParserConfig::default());
    let mut waypoints = Vec::new();

    let first = parser.parse_str(&create_test_cup(), 0, &mut waypoints);
    let second = parser.parse_str("name,lat,lon\nBad,x,y\nGood,5115.900N,00715.900W", 1, &mut waypoints);

    assert_close(second.stats.success_rate(), 50.0, 1e-9);

    let mut total = first.stats.clone();
    total.merge(&second.stats);
    assert_eq!(total.accepted, 4);
    assert_eq!(total.rejected, 1);
    assert_eq!(total.total_records, 12);
    assert_close(total.success_rate(), 80.0, 1e-9);
}
