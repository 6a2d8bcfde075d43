//! Grid resampling tool library.
//!
//! Exposes the load/resample/save pipeline so it can be tested without
//! spawning the binary.

pub mod pipeline;

pub use pipeline::{resample_grid, run, GridSummary, ResampleJob, ResampleReport, ResampleTarget};
