//! Data models for SeeYou waypoint processing
//!
//! This module contains the core data structures for representing imported
//! waypoints: geographic location, landing-site classification flags and the
//! waypoint record handed to the collection sink.

pub mod units;

use crate::constants::style_codes;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Geographic Location
// =============================================================================

/// Latitude/longitude pair in decimal degrees (WGS84)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees, positive north
    pub latitude: f64,

    /// Longitude in decimal degrees, positive east
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Return a copy with longitude wrapped into (-180, 180] and latitude
    /// clamped into [-90, 90]
    pub fn normalized(self) -> Self {
        Self {
            latitude: self.latitude.clamp(-90.0, 90.0),
            longitude: normalize_longitude(self.longitude),
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// Wrap a longitude into the half-open interval (-180, 180]
pub fn normalize_longitude(longitude: f64) -> f64 {
    let wrapped = longitude % 360.0;
    if wrapped > 180.0 {
        wrapped - 360.0
    } else if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

// =============================================================================
// Waypoint Classification
// =============================================================================

/// Known SeeYou style codes
///
/// Only the codes that influence classification are named; every other code
/// is carried as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaypointStyle {
    Normal,
    AirfieldGrass,
    Outlanding,
    GliderSite,
    AirfieldSolid,
    Other(i64),
}

impl WaypointStyle {
    pub fn from_code(code: i64) -> Self {
        match code {
            style_codes::NORMAL => Self::Normal,
            style_codes::AIRFIELD_GRASS => Self::AirfieldGrass,
            style_codes::OUTLANDING => Self::Outlanding,
            style_codes::GLIDER_SITE => Self::GliderSite,
            style_codes::AIRFIELD_SOLID => Self::AirfieldSolid,
            other => Self::Other(other),
        }
    }

    /// Whether this style denotes an airfield of any kind
    pub fn is_airport(&self) -> bool {
        matches!(
            self,
            Self::AirfieldGrass | Self::GliderSite | Self::AirfieldSolid
        )
    }

    /// Whether this style denotes an outlanding field
    pub fn is_landpoint(&self) -> bool {
        matches!(self, Self::Outlanding)
    }
}

/// Landing-site and task usage flags of a waypoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WaypointFlags {
    /// Usable as a task turnpoint
    pub turn_point: bool,

    /// Outlanding field
    pub land_point: bool,

    /// Airfield
    pub airport: bool,
}

impl WaypointFlags {
    /// Flags of a plain turnpoint
    pub const fn turnpoint() -> Self {
        Self {
            turn_point: true,
            land_point: false,
            airport: false,
        }
    }

    /// Whether a glider may land here
    pub fn is_landable(&self) -> bool {
        self.land_point || self.airport
    }
}

impl fmt::Display for WaypointFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.turn_point {
            names.push("turnpoint");
        }
        if self.land_point {
            names.push("landpoint");
        }
        if self.airport {
            names.push("airport");
        }
        write!(f, "{}", names.join("+"))
    }
}

// =============================================================================
// Waypoint Record
// =============================================================================

/// A waypoint imported from a SeeYou file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Waypoint name, never empty
    pub name: String,

    /// Normalized location
    pub location: GeoPoint,

    /// Elevation in meters, `None` when neither the file nor terrain knew it
    pub altitude: Option<f64>,

    /// Classification flags
    pub flags: WaypointFlags,

    /// Runway length in meters, 0 when unknown
    pub runway_length: f64,

    /// Runway direction in whole degrees [0, 360), `None` when unknown
    pub runway_direction: Option<u16>,

    /// Frequency, runway details and description joined by spaces
    pub comment: String,

    /// Tag of the file this waypoint came from
    pub file_num: u32,
}

impl Waypoint {
    /// Create a turnpoint at `location` with all optional attributes unknown
    pub fn new(name: impl Into<String>, location: GeoPoint, file_num: u32) -> Self {
        Self {
            name: name.into(),
            location,
            altitude: None,
            flags: WaypointFlags::turnpoint(),
            runway_length: 0.0,
            runway_direction: None,
            comment: String::new(),
            file_num,
        }
    }

    pub fn is_landable(&self) -> bool {
        self.flags.is_landable()
    }

    /// Append `text` to the comment, separated by a single space
    ///
    /// Empty fragments are ignored.
    pub fn append_comment(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if !self.comment.is_empty() {
            self.comment.push(crate::constants::COMMENT_SEPARATOR);
        }
        self.comment.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_longitude() {
        assert_eq!(normalize_longitude(0.0), 0.0);
        assert_eq!(normalize_longitude(180.0), 180.0);
        assert_eq!(normalize_longitude(-180.0), 180.0);
        assert!((normalize_longitude(190.0) - -170.0).abs() < 1e-9);
        assert!((normalize_longitude(-190.0) - 170.0).abs() < 1e-9);
        assert!((normalize_longitude(540.0) - 180.0).abs() < 1e-9);
        assert!((normalize_longitude(-7.265) - -7.265).abs() < 1e-12);
    }

    #[test]
    fn test_geopoint_normalized_clamps_latitude() {
        let point = GeoPoint::new(90.5, 180.5).normalized();
        assert_eq!(point.latitude, 90.0);
        assert!((point.longitude - -179.5).abs() < 1e-9);

        let point = GeoPoint::new(-90.5, -45.0).normalized();
        assert_eq!(point.latitude, -90.0);
        assert_eq!(point.longitude, -45.0);
    }

    #[test]
    fn test_waypoint_style_mapping() {
        assert_eq!(WaypointStyle::from_code(1), WaypointStyle::Normal);
        assert!(WaypointStyle::from_code(2).is_airport());
        assert!(WaypointStyle::from_code(4).is_airport());
        assert!(WaypointStyle::from_code(5).is_airport());
        assert!(WaypointStyle::from_code(3).is_landpoint());
        assert!(!WaypointStyle::from_code(3).is_airport());
        assert_eq!(WaypointStyle::from_code(17), WaypointStyle::Other(17));
        assert!(!WaypointStyle::from_code(17).is_airport());
        assert!(!WaypointStyle::from_code(17).is_landpoint());
    }

    #[test]
    fn test_flags_landable_and_display() {
        let mut flags = WaypointFlags::turnpoint();
        assert!(!flags.is_landable());
        assert_eq!(flags.to_string(), "turnpoint");

        flags.land_point = true;
        assert!(flags.is_landable());
        assert_eq!(flags.to_string(), "turnpoint+landpoint");

        flags.land_point = false;
        flags.airport = true;
        assert!(flags.is_landable());
        assert_eq!(flags.to_string(), "turnpoint+airport");
    }

    #[test]
    fn test_append_comment() {
        let mut waypoint = Waypoint::new("Alpha", GeoPoint::new(51.0, 7.0), 0);
        waypoint.append_comment("");
        assert_eq!(waypoint.comment, "");

        waypoint.append_comment("118.500");
        waypoint.append_comment("");
        waypoint.append_comment("Main field");
        assert_eq!(waypoint.comment, "118.500 Main field");
    }

    #[test]
    fn test_waypoint_defaults() {
        let waypoint = Waypoint::new("Alpha", GeoPoint::new(51.0, 7.0), 3);
        assert_eq!(waypoint.flags, WaypointFlags::turnpoint());
        assert_eq!(waypoint.altitude, None);
        assert_eq!(waypoint.runway_direction, None);
        assert_eq!(waypoint.runway_length, 0.0);
        assert_eq!(waypoint.file_num, 3);
        assert!(!waypoint.is_landable());
    }

    #[test]
    fn test_serde_serialization() {
        let mut waypoint = Waypoint::new("Alpha", GeoPoint::new(51.265, -7.265), 1);
        waypoint.altitude = Some(458.0);
        waypoint.runway_direction = Some(90);

        let json = serde_json::to_string(&waypoint).unwrap();
        let deserialized: Waypoint = serde_json::from_str(&json).unwrap();
        assert_eq!(waypoint, deserialized);
    }
}
