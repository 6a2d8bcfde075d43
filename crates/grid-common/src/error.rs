//! Error types for grid construction and I/O.

use thiserror::Error;

/// Result type alias using GridError.
pub type GridResult<T> = Result<T, GridError>;

/// Errors raised while building, reading or writing a grid.
#[derive(Debug, Error)]
pub enum GridError {
    /// The values buffer does not hold `count_x * count_y` cells.
    #[error("grid is {count_x}x{count_y} but has {actual} values")]
    DimensionMismatch {
        count_x: usize,
        count_y: usize,
        actual: usize,
    },

    /// The mask buffer length differs from the values buffer length.
    #[error("mask has {mask} entries but grid has {values} values")]
    MaskMismatch { values: usize, mask: usize },

    /// A required header field is missing from a grid file.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A line of a grid file could not be parsed.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GridError {
    /// Create a Parse error.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create a MissingField error.
    pub fn missing_field(name: impl Into<String>) -> Self {
        Self::MissingField(name.into())
    }
}
