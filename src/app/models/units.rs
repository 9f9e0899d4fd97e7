//! Length units found in SeeYou files and their conversion to meters

use crate::constants::{METERS_PER_FOOT, METERS_PER_NAUTICAL_MILE, METERS_PER_STATUTE_MILE};

/// Source unit of an elevation or distance value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Meters,
    Feet,
    StatuteMiles,
    NauticalMiles,
}

impl Unit {
    /// Multiplier converting a value in this unit to meters
    pub fn factor(self) -> f64 {
        match self {
            Unit::Meters => 1.0,
            Unit::Feet => METERS_PER_FOOT,
            Unit::StatuteMiles => METERS_PER_STATUTE_MILE,
            Unit::NauticalMiles => METERS_PER_NAUTICAL_MILE,
        }
    }

    /// Convert `value` in this unit to meters
    pub fn to_system(self, value: f64) -> f64 {
        value * self.factor()
    }
}
