//! Waypoint collection sink
//!
//! The parser hands every accepted waypoint to a [`WaypointSink`]. The sink
//! takes ownership and assigns the persistent identity. [`WaypointStore`] is
//! the in-memory implementation used by the command line front end.

use crate::app::models::Waypoint;
use serde::Serialize;
use std::collections::BTreeMap;

/// Receiver of finished waypoints
pub trait WaypointSink {
    /// Take ownership of one waypoint
    fn add_waypoint(&mut self, waypoint: Waypoint);
}

impl WaypointSink for Vec<Waypoint> {
    fn add_waypoint(&mut self, waypoint: Waypoint) {
        self.push(waypoint);
    }
}

/// A waypoint together with the identity assigned by the store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredWaypoint {
    /// Store-assigned id, starting at 1
    pub id: u32,

    #[serde(flatten)]
    pub waypoint: Waypoint,
}

/// In-memory waypoint collection with sequential ids
#[derive(Debug, Clone, Default)]
pub struct WaypointStore {
    waypoints: Vec<StoredWaypoint>,
}

impl WaypointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a waypoint by its store id
    pub fn get(&self, id: u32) -> Option<&StoredWaypoint> {
        // ids are dense and start at 1
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.waypoints.get(index)
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// All waypoints in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &StoredWaypoint> {
        self.waypoints.iter()
    }

    /// Find waypoints whose names contain `pattern` (case-insensitive)
    pub fn find_by_name(&self, pattern: &str) -> Vec<&StoredWaypoint> {
        let pattern_lower = pattern.to_lowercase();
        self.waypoints
            .iter()
            .filter(|stored| stored.waypoint.name.to_lowercase().contains(&pattern_lower))
            .collect()
    }

    /// All waypoints flagged as landpoint or airport
    pub fn landables(&self) -> Vec<&StoredWaypoint> {
        self.waypoints
            .iter()
            .filter(|stored| stored.waypoint.is_landable())
            .collect()
    }

    /// Number of waypoints contributed by each source file
    pub fn count_by_file(&self) -> BTreeMap<u32, usize> {
        let mut counts = BTreeMap::new();
        for stored in &self.waypoints {
            *counts.entry(stored.waypoint.file_num).or_insert(0) += 1;
        }
        counts
    }
}

impl WaypointSink for WaypointStore {
    fn add_waypoint(&mut self, waypoint: Waypoint) {
        let id = self.waypoints.len() as u32 + 1;
        self.waypoints.push(StoredWaypoint { id, waypoint });
    }
}
