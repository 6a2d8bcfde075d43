//! Error types for grid resampling.

use thiserror::Error;

/// Reasons a resample request is rejected.
///
/// All of these are detected before the grid is touched, so a grid is
/// always left unchanged when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResampleError {
    /// The target resolution equals the current one.
    #[error("grid is already {count_x}x{count_y}")]
    NoOpResolution { count_x: usize, count_y: usize },

    /// The target resolution is larger than the current one in some axis.
    #[error("cannot increase resolution from {current_x}x{current_y} to {target_x}x{target_y}")]
    UpsamplingNotSupported {
        current_x: usize,
        current_y: usize,
        target_x: i64,
        target_y: i64,
    },

    /// The target resolution is zero or negative in some axis.
    #[error("invalid target resolution {target_x}x{target_y}")]
    InvalidResolution { target_x: i64, target_y: i64 },

    /// The strategy needs an exact integer decimation factor.
    #[error("{current_x}x{current_y} is not an integral multiple of {target_x}x{target_y}")]
    NonIntegralFactor {
        current_x: usize,
        current_y: usize,
        target_x: usize,
        target_y: usize,
    },
}

/// Result type for resample operations.
pub type Result<T> = std::result::Result<T, ResampleError>;
