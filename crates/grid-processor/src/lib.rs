//! Grid resolution reduction.
//!
//! This crate reduces the resolution of [`GridData`] rasters in place:
//!
//! - **Nearest neighbour**: any target no larger than the grid
//! - **Max pooling**: targets that divide the grid exactly, mask-aware
//!
//! # Example
//!
//! ```
//! use grid_processor::{GeoBounds, GridData, MaxResampler, Resampler};
//!
//! let values: Vec<f32> = (1..=16).map(|v| v as f32).collect();
//! let bounds = GeoBounds::new(0.0, 4.0, 4.0, 0.0);
//! let mut grid = GridData::new(bounds, 4, 4, values, None).unwrap();
//!
//! MaxResampler.resample(&mut grid, 2, 2).unwrap();
//! assert_eq!(grid.values, vec![6.0, 8.0, 14.0, 16.0]);
//! ```

pub mod config;
pub mod error;
pub mod resample;

pub use config::ResamplerConfig;
pub use error::{ResampleError, Result};
pub use resample::{MaxResampler, NearestNeighbourResampler, ResampleMethod, Resampler};

// Re-export the grid model so callers need a single dependency
pub use grid_common::{DataResolution, GeoBounds, GridData, ResolutionUnits};
