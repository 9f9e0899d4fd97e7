//! SeeYou (`.cup`) waypoint file parser
//!
//! This module turns the lines of a SeeYou waypoint file into [`Waypoint`]
//! records. Every line yields exactly one [`RecordOutcome`]: accepted,
//! skipped (blank, comment, header, task section) or rejected with a reason.
//! A rejected record never aborts the file.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`tokenizer`] - Quote-aware splitting of a record into fields
//! - [`column_mapping`] - Header keywords to column index mapping
//! - [`field_parsers`] - Elevation/distance values, style codes, runway direction
//! - [`angle`] - `DDMM.mmmH` latitude and `DDDMM.mmmH` longitude fields
//! - [`state`] - Per-file parser state (column map and task-section flag)
//! - [`record_parser`] - Per-record orchestration and outcome types
//! - [`parser`] - File sessions feeding lines and forwarding waypoints to a sink
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use seeyou_processor::app::services::seeyou_parser::SeeYouParser;
//! use seeyou_processor::app::services::waypoint_store::WaypointStore;
//! use seeyou_processor::ParserConfig;
//!
//! let parser = SeeYouParser::new(ParserConfig::default());
//! let mut store = WaypointStore::new();
//! let content = "name,code,country,lat,lon,elev,style\n\
//!                Alpha,A1,US,5115.900N,00715.900W,458.0m,5\n";
//!
//! let result = parser.parse_str(content, 0, &mut store);
//! assert_eq!(result.stats.accepted, 1);
//! assert_eq!(store.len(), 1);
//! ```
//!
//! [`Waypoint`]: crate::app::models::Waypoint

pub mod angle;
pub mod column_mapping;
pub mod field_parsers;
pub mod parser;
pub mod record_parser;
pub mod state;
pub mod stats;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use angle::parse_angle;
pub use column_mapping::{Column, ColumnMap};
pub use field_parsers::{ValueDomain, classify_style, parse_runway_direction, parse_unit_value};
pub use parser::{ParseSession, SeeYouParser};
pub use record_parser::{RecordContext, RecordOutcome, RejectReason, SkipReason, parse_record};
pub use state::ParserState;
pub use stats::{ParseResult, ParseStats, Rejection};
pub use tokenizer::{FieldTokenizer, TokenizedRecord, tokenize};
