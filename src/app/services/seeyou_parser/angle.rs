//! Latitude/longitude field parsing
//!
//! SeeYou encodes angles as degrees and decimal minutes packed into one
//! number, followed by a hemisphere letter: `5115.900N` is 51°15.900' north,
//! `00715.900W` is 7°15.900' west.

use super::field_parsers::leading_integer;
use crate::constants::{MAX_LATITUDE_DEGREES, MAX_LONGITUDE_DEGREES};

/// Parse a packed `DDDMM.mmm` angle with hemisphere letter into signed degrees
///
/// Degrees above 90 (latitude) or 180 (longitude) are clamped rather than
/// rejected. The fraction must be exactly three digits. `S`/`W` (either case)
/// negate the value; any other trailing character leaves it positive.
pub fn parse_angle(token: &str, is_latitude: bool) -> Option<f64> {
    let (packed, rest) = leading_integer(token)?;
    if packed < 0 {
        return None;
    }

    let max_degrees = if is_latitude {
        MAX_LATITUDE_DEGREES
    } else {
        MAX_LONGITUDE_DEGREES
    };
    let degrees = (packed / 100).min(max_degrees);
    let minutes = packed % 100;
    if minutes >= 60 {
        return None;
    }

    let fraction = rest.strip_prefix('.')?;
    let digits = fraction.get(..3)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hemisphere = &fraction[3..];
    if hemisphere.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let thousandths: u16 = digits.parse().ok()?;

    let value = degrees as f64 + minutes as f64 / 60.0 + f64::from(thousandths) / 60000.0;

    match hemisphere.chars().next() {
        Some('W' | 'w' | 'S' | 's') => Some(-value),
        _ => Some(value),
    }
}
