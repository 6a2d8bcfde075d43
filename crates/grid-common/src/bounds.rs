//! Geographic extent of a grid.

use serde::{Deserialize, Serialize};

/// A geographic bounding box in degrees.
///
/// Grids are stored north-up: row 0 touches `north` and column 0 touches
/// `west`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoBounds {
    pub west: f64,
    pub east: f64,
    pub north: f64,
    pub south: f64,
}

impl GeoBounds {
    /// Create new bounds from the four edges.
    pub fn new(west: f64, east: f64, north: f64, south: f64) -> Self {
        Self {
            west,
            east,
            north,
            south,
        }
    }

    /// Width in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Height in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Check if a point lies inside (edges included).
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.west && lon <= self.east && lat >= self.south && lat <= self.north
    }

    /// Check if these bounds overlap another set of bounds.
    pub fn intersects(&self, other: &GeoBounds) -> bool {
        self.east > other.west
            && self.west < other.east
            && self.north > other.south
            && self.south < other.north
    }
}
