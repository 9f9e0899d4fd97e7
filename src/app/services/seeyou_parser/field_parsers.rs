//! Field parsing utilities for SeeYou records
//!
//! SeeYou fields carry a number followed by free text: `458.0m`, `1500ft`,
//! `2NM`, `5`. The helpers here read the numeric prefix the way C's
//! `strtod`/`strtol` would and interpret the remaining suffix.

use regex::Regex;
use std::sync::LazyLock;

use crate::app::models::units::Unit;
use crate::app::models::{WaypointFlags, WaypointStyle};

static DECIMAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("valid decimal pattern")
});

static INTEGER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[+-]?[0-9]+").expect("valid integer pattern"));

/// Quantity a unit value represents; decides which suffixes are understood
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueDomain {
    /// Elevations: `F`/`f` suffix means feet
    Elevation,
    /// Distances: `ml` means statute miles, `nm` nautical miles
    Distance,
}

/// Leading decimal number of `text` and the unparsed remainder
pub fn leading_decimal(text: &str) -> Option<(f64, &str)> {
    let matched = DECIMAL_PREFIX.find(text)?;
    let value = matched.as_str().trim_start().parse::<f64>().ok()?;
    Some((value, &text[matched.end()..]))
}

/// Leading integer of `text` and the unparsed remainder
///
/// Returns `None` when there are no digits or the value does not fit `i64`.
pub fn leading_integer(text: &str) -> Option<(i64, &str)> {
    let matched = INTEGER_PREFIX.find(text)?;
    let value = matched.as_str().trim_start().parse::<i64>().ok()?;
    Some((value, &text[matched.end()..]))
}

/// Parse an elevation or distance with optional unit suffix into meters
///
/// Fails only when `token` has no numeric prefix. Unknown suffixes are
/// treated as meters.
pub fn parse_unit_value(token: &str, domain: ValueDomain) -> Option<f64> {
    let (value, suffix) = leading_decimal(token)?;

    let unit = match domain {
        ValueDomain::Elevation => {
            if suffix.starts_with(['F', 'f']) {
                Unit::Feet
            } else {
                Unit::Meters
            }
        }
        ValueDomain::Distance => {
            if suffix.eq_ignore_ascii_case("ml") {
                Unit::StatuteMiles
            } else if suffix.eq_ignore_ascii_case("nm") {
                Unit::NauticalMiles
            } else {
                Unit::Meters
            }
        }
    };

    Some(unit.to_system(value))
}

/// Classify a style code field
///
/// Outlanding fields (3) become landpoints, airfields and gliding sites
/// (2, 4, 5) become airports. Every style is a turnpoint. Fails only when
/// `token` has no numeric prefix.
pub fn classify_style(token: &str) -> Option<WaypointFlags> {
    let (code, _) = leading_integer(token)?;
    let style = WaypointStyle::from_code(code);

    Some(WaypointFlags {
        turn_point: true,
        land_point: style.is_landpoint(),
        airport: style.is_airport(),
    })
}

/// Parse a runway direction in whole degrees
///
/// 360 is folded to 0. Values outside [0, 360] and tokens without a numeric
/// prefix are unknown.
pub fn parse_runway_direction(token: &str) -> Option<u16> {
    let (degrees, _) = leading_integer(token)?;
    match degrees {
        360 => Some(0),
        0..=359 => u16::try_from(degrees).ok(),
        _ => None,
    }
}
