//! Terrain elevation lookup
//!
//! Records without a usable elevation field fall back to the terrain model.
//! The parser only depends on the [`TerrainLookup`] trait; raster terrain
//! loading lives outside this crate.

use crate::app::models::GeoPoint;
use std::fmt;

/// Source of ground elevation for a location
pub trait TerrainLookup: Send + Sync {
    /// Ground elevation in meters at `location`, `None` when no data covers it
    fn elevation_at(&self, location: GeoPoint) -> Option<f64>;
}

/// Terrain source that never has data
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTerrain;

impl TerrainLookup for NoTerrain {
    fn elevation_at(&self, _location: GeoPoint) -> Option<f64> {
        None
    }
}

impl<F> TerrainLookup for F
where
    F: Fn(GeoPoint) -> Option<f64> + Send + Sync,
{
    fn elevation_at(&self, location: GeoPoint) -> Option<f64> {
        self(location)
    }
}

impl fmt::Debug for dyn TerrainLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TerrainLookup")
    }
}
