//! Target cell sizes and degree/meter conversions.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Equatorial radius in meters (WGS84).
pub const EARTH_RADIUS: f64 = 6_378_137.0;
/// Half of the equatorial circumference in meters.
pub const HALF_EARTH_CIRCUMFERENCE: f64 = PI * EARTH_RADIUS;
/// Meters per degree at the equator (~111 km).
pub const DEGREES_TO_METERS: f64 = HALF_EARTH_CIRCUMFERENCE / 180.0;
/// Degrees per meter at the equator.
pub const METERS_TO_DEGREES: f64 = 180.0 / HALF_EARTH_CIRCUMFERENCE;

/// Unit a [`DataResolution`] size is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionUnits {
    /// Arc-seconds.
    Seconds,
    Meters,
}

/// A named cell size used as a resampling target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResolution {
    pub name: String,
    pub size: f64,
    pub units: ResolutionUnits,
}

impl DataResolution {
    pub fn new(name: impl Into<String>, size: f64, units: ResolutionUnits) -> Self {
        Self {
            name: name.into(),
            size,
            units,
        }
    }

    /// Standard resolutions, coarsest first.
    pub fn presets() -> Vec<DataResolution> {
        vec![
            Self::new("World", 1500.0, ResolutionUnits::Seconds),
            Self::new("Continent", 300.0, ResolutionUnits::Seconds),
            Self::new("Region", 30.0, ResolutionUnits::Seconds),
            Self::new("City", 100.0, ResolutionUnits::Meters),
            Self::new("Neighbourhood", 10.0, ResolutionUnits::Meters),
        ]
    }

    /// Look up a preset by name (case-insensitive).
    pub fn preset(name: &str) -> Option<DataResolution> {
        Self::presets()
            .into_iter()
            .find(|res| res.name.eq_ignore_ascii_case(name))
    }

    /// Cell size in degrees.
    pub fn to_degrees(&self) -> f64 {
        match self.units {
            ResolutionUnits::Seconds => self.size / 3600.0,
            ResolutionUnits::Meters => self.size * METERS_TO_DEGREES,
        }
    }

    /// Approximate cell size in meters (at the equator).
    pub fn to_meters(&self) -> f64 {
        match self.units {
            ResolutionUnits::Seconds => self.size * DEGREES_TO_METERS / 3600.0,
            ResolutionUnits::Meters => self.size,
        }
    }
}

/// Split decimal degrees into whole degrees, minutes and seconds.
fn to_dms(degrees: f64) -> (f64, f64, f64) {
    // Work in whole seconds so 1500" does not come out as 24' 60"
    let total = (degrees * 3600.0).round();
    let d = (total / 3600.0).trunc();
    let m = ((total - d * 3600.0) / 60.0).trunc();
    let s = total - d * 3600.0 - m * 60.0;
    (d, m, s)
}

fn meters_to_string(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{} km", meters / 1000.0)
    } else {
        format!("{} m", meters)
    }
}

impl fmt::Display for DataResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.units {
            ResolutionUnits::Seconds => {
                let degrees = self.size / 3600.0;
                let (d, m, s) = to_dms(degrees);
                let meters = (degrees * DEGREES_TO_METERS).round();
                write!(f, "{}° {}' {}\"  (~{})", d, m, s, meters_to_string(meters))
            }
            ResolutionUnits::Meters => write!(f, "{}", meters_to_string(self.size)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_to_degrees() {
        let res = DataResolution::new("Region", 30.0, ResolutionUnits::Seconds);
        assert!((res.to_degrees() - 30.0 / 3600.0).abs() < 1e-12);
    }

    #[test]
    fn test_meters_round_trip_through_degrees() {
        let res = DataResolution::new("City", 100.0, ResolutionUnits::Meters);
        assert!((res.to_degrees() * DEGREES_TO_METERS - 100.0).abs() < 1e-6);
        assert_eq!(res.to_meters(), 100.0);
    }

    #[test]
    fn test_degree_is_about_111_km() {
        assert!((DEGREES_TO_METERS - 111_319.49).abs() < 0.01);
    }

    #[test]
    fn test_preset_lookup_is_case_insensitive() {
        let res = DataResolution::preset("city").unwrap();
        assert_eq!(res.units, ResolutionUnits::Meters);
        assert_eq!(res.size, 100.0);
        assert!(DataResolution::preset("galaxy").is_none());
    }

    #[test]
    fn test_display() {
        let world = DataResolution::preset("World").unwrap();
        assert!(world.to_string().starts_with("0° 25' 0\""));
        let hood = DataResolution::preset("Neighbourhood").unwrap();
        assert_eq!(hood.to_string(), "10 m");
    }
}
