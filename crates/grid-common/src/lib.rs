//! Common types shared by the grid resampling crates.
//!
//! - [`GridData`]: a georeferenced `f32` raster with an optional validity mask
//! - [`GeoBounds`]: the geographic extent of a grid
//! - [`DataResolution`]: named target cell sizes (arc-seconds or meters)
//! - [`csv`]: the line-oriented CSV grid format

pub mod bounds;
pub mod csv;
pub mod error;
pub mod grid;
pub mod resolution;

pub use bounds::GeoBounds;
pub use error::{GridError, GridResult};
pub use grid::{GridData, DEFAULT_DISTRIBUTION_SIZE};
pub use resolution::{DataResolution, ResolutionUnits};
