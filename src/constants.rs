//! Application constants for SeeYou processor
//!
//! This module contains the format markers, parser limits, unit conversion
//! factors and classification thresholds used throughout the SeeYou processor.

// =============================================================================
// Record Markers
// =============================================================================

/// Marker after which a SeeYou file holds task definitions instead of waypoints
pub const SECTION_END_MARKER: &str = "-----Related Tasks-----";

/// Prefix of comment records
pub const COMMENT_MARKER: char = '*';

/// End-of-file sentinel byte (Ctrl-Z) left behind by some DOS tools
pub const EOF_SENTINEL: char = '\u{1a}';

/// Degree mark appended to the runway direction text in comments
pub const DEGREE_MARK: char = '°';

/// Separator placed between comment fragments
pub const COMMENT_SEPARATOR: char = ' ';

/// File extension of SeeYou waypoint files (matched case-insensitively)
pub const SEEYOU_FILE_EXTENSION: &str = "cup";

// =============================================================================
// Parser Limits and Defaults
// =============================================================================

/// Default quote character delimiting fields that contain commas
pub const DEFAULT_QUOTE_CHAR: char = '"';

/// Default number of tokens kept per record
pub const DEFAULT_MAX_TOKENS: usize = 20;

/// Default record length bound; records this long or longer are rejected
pub const DEFAULT_MAX_LINE_LENGTH: usize = 255;

// =============================================================================
// Unit Conversion Factors (to meters)
// =============================================================================

/// Meters per international foot
pub const METERS_PER_FOOT: f64 = 0.3048;

/// Meters per statute mile
pub const METERS_PER_STATUTE_MILE: f64 = 1609.344;

/// Meters per nautical mile
pub const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;

// =============================================================================
// Coordinate Limits
// =============================================================================

/// Maximum whole degrees of a latitude before clamping
pub const MAX_LATITUDE_DEGREES: i64 = 90;

/// Maximum whole degrees of a longitude before clamping
pub const MAX_LONGITUDE_DEGREES: i64 = 180;

// =============================================================================
// Landing Site Classification
// =============================================================================

/// Runway lengths above this (meters) make an unclassified site an outlanding field
pub const LANDPOINT_MIN_RUNWAY_LENGTH: f64 = 100.0;

/// Runway lengths above this (meters) make an unclassified site an airport
pub const AIRPORT_MIN_RUNWAY_LENGTH: f64 = 300.0;

/// SeeYou style codes
pub mod style_codes {
    /// Plain waypoint
    pub const NORMAL: i64 = 1;

    /// Airfield with grass surface
    pub const AIRFIELD_GRASS: i64 = 2;

    /// Outlanding field
    pub const OUTLANDING: i64 = 3;

    /// Gliding site
    pub const GLIDER_SITE: i64 = 4;

    /// Airfield with paved surface
    pub const AIRFIELD_SOLID: i64 = 5;
}

// =============================================================================
// Configuration
// =============================================================================

/// Application directory name used below the user configuration directory
pub const CONFIG_DIR_NAME: &str = "seeyou-processor";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.json";
