//! Resolution reduction for georeferenced grids.
//!
//! A [`Resampler`] validates a target resolution and then rebuilds the grid
//! buffers in place. Two strategies are provided:
//! - **Nearest**: one source sample per output cell, any decimation factor
//! - **Max**: largest valid source value per output cell, integral factors only
//!
//! Both map cell coordinates with a half-cell offset followed by truncation,
//! i.e. `trunc(0.5 * scale + i * scale)`. This is not rounding: at some
//! non-integral scales the chosen cell is one off from the geometrically
//! nearest one.

use std::fmt;

use grid_common::{DataResolution, GridData};
use serde::{Deserialize, Serialize};

use crate::error::{ResampleError, Result};

/// A strategy for reducing a grid's resolution.
pub trait Resampler: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether the old counts must be exact multiples of the new ones.
    fn integral_factor_only(&self) -> bool;

    /// Rebuild `grid` at `count_x` x `count_y`.
    ///
    /// Only called with targets that passed [`Resampler::check`].
    fn apply(&self, grid: &mut GridData, count_x: usize, count_y: usize);

    /// Validate a target resolution against `grid` without modifying it.
    fn check(&self, grid: &GridData, count_x: i64, count_y: i64) -> Result<(usize, usize)> {
        let current_x = grid.count_x as i64;
        let current_y = grid.count_y as i64;

        if count_x == current_x && count_y == current_y {
            return Err(ResampleError::NoOpResolution {
                count_x: grid.count_x,
                count_y: grid.count_y,
            });
        }
        if count_x > current_x || count_y > current_y {
            return Err(ResampleError::UpsamplingNotSupported {
                current_x: grid.count_x,
                current_y: grid.count_y,
                target_x: count_x,
                target_y: count_y,
            });
        }
        if count_x < 1 || count_y < 1 {
            return Err(ResampleError::InvalidResolution {
                target_x: count_x,
                target_y: count_y,
            });
        }

        let (count_x, count_y) = (count_x as usize, count_y as usize);
        if self.integral_factor_only()
            && (grid.count_x % count_x != 0 || grid.count_y % count_y != 0)
        {
            return Err(ResampleError::NonIntegralFactor {
                current_x: grid.count_x,
                current_y: grid.count_y,
                target_x: count_x,
                target_y: count_y,
            });
        }

        Ok((count_x, count_y))
    }

    /// Resample `grid` to `count_x` x `count_y` cells.
    ///
    /// On error the grid is left untouched. Statistics (min/max,
    /// distribution) are not refreshed.
    fn resample(&self, grid: &mut GridData, count_x: i64, count_y: i64) -> Result<()> {
        let (new_x, new_y) = match self.check(grid, count_x, count_y) {
            Ok(counts) => counts,
            Err(e) => {
                tracing::warn!(
                    resampler = self.name(),
                    current_x = grid.count_x,
                    current_y = grid.count_y,
                    target_x = count_x,
                    target_y = count_y,
                    error = %e,
                    "Rejected grid resample"
                );
                return Err(e);
            }
        };

        let (old_x, old_y) = (grid.count_x, grid.count_y);
        self.apply(grid, new_x, new_y);

        tracing::debug!(
            resampler = self.name(),
            old_x,
            old_y,
            new_x,
            new_y,
            masked = grid.mask.is_some(),
            "Resampled grid"
        );

        Ok(())
    }

    /// Resample to a cell size given in degrees per cell.
    fn resample_to_cell_size(
        &self,
        grid: &mut GridData,
        deg_per_cell_x: f64,
        deg_per_cell_y: f64,
    ) -> Result<()> {
        let (count_x, count_y) = grid.calculate_resolution(deg_per_cell_x, deg_per_cell_y);
        self.resample(grid, count_x, count_y)
    }

    /// Resample to a named resolution, same cell size on both axes.
    fn resample_to_resolution(&self, grid: &mut GridData, resolution: &DataResolution) -> Result<()> {
        let degrees = resolution.to_degrees();
        self.resample_to_cell_size(grid, degrees, degrees)
    }
}

/// Picks the source cell under the centre of each output cell.
///
/// Masks are copied along with the values.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighbourResampler;

impl Resampler for NearestNeighbourResampler {
    fn name(&self) -> &'static str {
        "nearest"
    }

    fn integral_factor_only(&self) -> bool {
        false
    }

    fn apply(&self, grid: &mut GridData, count_x: usize, count_y: usize) {
        let input_values = std::mem::take(&mut grid.values);
        let input_mask = grid.mask.take();
        let input_count_x = grid.count_x;
        let input_count_y = grid.count_y;

        grid.count_x = count_x;
        grid.count_y = count_y;
        grid.init_values(input_mask.is_some());

        let scale_x = input_count_x as f64 / count_x as f64;
        let scale_y = input_count_y as f64 / count_y as f64;
        let offset_x = 0.5 * scale_x;
        let offset_y = 0.5 * scale_y;

        let mut output_index = 0;
        for y in 0..count_y {
            let row = input_count_x * (offset_y + y as f64 * scale_y) as usize;
            for x in 0..count_x {
                let input_index = row + (offset_x + x as f64 * scale_x) as usize;
                grid.values[output_index] = input_values[input_index];
                if let (Some(output_mask), Some(input_mask)) = (&mut grid.mask, &input_mask) {
                    output_mask[output_index] = input_mask[input_index];
                }
                output_index += 1;
            }
        }
    }
}

/// Keeps the largest valid value of each block of source cells.
///
/// Output cells that receive no valid source keep `f32::MIN` and a mask of 0.
/// A grid without a mask stays without one. A NaN source replaces the running
/// maximum of its block, and the next source of that block replaces the NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxResampler;

/// `current` wins only when strictly greater, unlike `f32::max` which drops NaN.
fn pooled_max(current: f32, value: f32) -> f32 {
    if current > value {
        current
    } else {
        value
    }
}

impl Resampler for MaxResampler {
    fn name(&self) -> &'static str {
        "max"
    }

    fn integral_factor_only(&self) -> bool {
        true
    }

    fn apply(&self, grid: &mut GridData, count_x: usize, count_y: usize) {
        let input_values = std::mem::take(&mut grid.values);
        let input_mask = grid.mask.take();
        let input_count_x = grid.count_x;
        let input_count_y = grid.count_y;

        grid.count_x = count_x;
        grid.count_y = count_y;
        grid.init_values(input_mask.is_some());
        grid.values.fill(f32::MIN);

        // Scatter each source cell into the output cell it falls in
        let scale_x = count_x as f64 / input_count_x as f64;
        let scale_y = count_y as f64 / input_count_y as f64;
        let offset_x = 0.5 * scale_x;
        let offset_y = 0.5 * scale_y;

        let mut input_index = 0;
        for y in 0..input_count_y {
            let row = count_x * (offset_y + y as f64 * scale_y) as usize;
            for x in 0..input_count_x {
                let output_index = row + (offset_x + x as f64 * scale_x) as usize;
                let value = input_values[input_index];
                match (&mut grid.mask, &input_mask) {
                    (Some(output_mask), Some(input_mask)) => {
                        if input_mask[input_index] == 1 {
                            grid.values[output_index] =
                                pooled_max(grid.values[output_index], value);
                            output_mask[output_index] = 1;
                        }
                    }
                    _ => {
                        grid.values[output_index] = pooled_max(grid.values[output_index], value);
                    }
                }
                input_index += 1;
            }
        }
    }
}

/// Method used to resample grid data.
///
/// - **Nearest**: categorical data or any non-integral reduction
/// - **Max**: peak/threshold data where maxima must survive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResampleMethod {
    #[default]
    Nearest,
    Max,
}

impl ResampleMethod {
    /// Parse a method name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "nearest" | "nn" | "nearest_neighbour" | "nearest_neighbor" => Some(Self::Nearest),
            "max" => Some(Self::Max),
            _ => None,
        }
    }

    /// The resampler implementing this method.
    pub fn resampler(self) -> Box<dyn Resampler> {
        match self {
            Self::Nearest => Box::new(NearestNeighbourResampler),
            Self::Max => Box::new(MaxResampler),
        }
    }

    pub fn integral_factor_only(self) -> bool {
        self.resampler().integral_factor_only()
    }
}

impl fmt::Display for ResampleMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nearest => write!(f, "nearest"),
            Self::Max => write!(f, "max"),
        }
    }
}
