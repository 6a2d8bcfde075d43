//! Load a CSV grid, resample it and write the result.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use grid_common::csv::{read_csv_file, write_csv_file};
use grid_processor::{DataResolution, GridData, ResampleError, ResampleMethod, ResamplerConfig};
use serde::Serialize;
use tracing::info;

/// The resolution a grid should be reduced to.
#[derive(Debug, Clone, PartialEq)]
pub enum ResampleTarget {
    /// Explicit cell counts.
    Counts { count_x: i64, count_y: i64 },
    /// Degrees per cell, same on both axes.
    CellSize(f64),
    /// A named resolution such as "City".
    Resolution(DataResolution),
}

impl fmt::Display for ResampleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Counts { count_x, count_y } => write!(f, "{}x{} cells", count_x, count_y),
            Self::CellSize(degrees) => write!(f, "{}° per cell", degrees),
            Self::Resolution(res) => write!(f, "{} ({})", res.name, res),
        }
    }
}

/// Resample `grid` in place and refresh its statistics if configured.
pub fn resample_grid(
    grid: &mut GridData,
    target: &ResampleTarget,
    config: &ResamplerConfig,
) -> std::result::Result<(), ResampleError> {
    let resampler = config.method.resampler();
    match target {
        ResampleTarget::Counts { count_x, count_y } => {
            resampler.resample(grid, *count_x, *count_y)?
        }
        ResampleTarget::CellSize(degrees) => {
            resampler.resample_to_cell_size(grid, *degrees, *degrees)?
        }
        ResampleTarget::Resolution(resolution) => {
            resampler.resample_to_resolution(grid, resolution)?
        }
    }

    if config.update_statistics {
        grid.update_min_max();
        grid.update_distribution(config.crop_distribution);
    }

    Ok(())
}

/// A single file-to-file resampling job.
#[derive(Debug, Clone)]
pub struct ResampleJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub target: ResampleTarget,
    pub config: ResamplerConfig,
}

/// Dimensions and statistics of a grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSummary {
    pub count_x: usize,
    pub count_y: usize,
    pub valid_cells: usize,
    pub masked: bool,
    /// `None` when the grid has no valid cell.
    pub min_value: Option<f32>,
    pub max_value: Option<f32>,
}

impl GridSummary {
    pub fn of(grid: &GridData) -> Self {
        let valid_cells = grid.valid_count();
        let has_data = valid_cells > 0;
        Self {
            count_x: grid.count_x,
            count_y: grid.count_y,
            valid_cells,
            masked: grid.mask.is_some(),
            min_value: has_data.then_some(grid.min_value),
            max_value: has_data.then_some(grid.max_value),
        }
    }
}

/// Outcome of a [`ResampleJob`], printed as JSON by the binary.
#[derive(Debug, Clone, Serialize)]
pub struct ResampleReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub method: ResampleMethod,
    pub target: String,
    pub before: GridSummary,
    pub after: GridSummary,
}

/// Run a job. Nothing is written when the resampler rejects the target.
pub fn run(job: &ResampleJob) -> Result<ResampleReport> {
    let mut grid = read_csv_file(&job.input)
        .with_context(|| format!("Failed to read grid from {}", job.input.display()))?;
    let before = GridSummary::of(&grid);

    info!(
        input = %job.input.display(),
        count_x = grid.count_x,
        count_y = grid.count_y,
        method = %job.config.method,
        target = %job.target,
        "Resampling grid"
    );

    resample_grid(&mut grid, &job.target, &job.config)
        .with_context(|| format!("Cannot resample {} to {}", job.input.display(), job.target))?;

    if let Some(parent) = job.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    write_csv_file(&grid, &job.output)
        .with_context(|| format!("Failed to write grid to {}", job.output.display()))?;

    let after = GridSummary::of(&grid);
    info!(
        output = %job.output.display(),
        count_x = after.count_x,
        count_y = after.count_y,
        valid_cells = after.valid_cells,
        "Wrote resampled grid"
    );

    Ok(ResampleReport {
        input: job.input.clone(),
        output: job.output.clone(),
        method: job.config.method,
        target: job.target.to_string(),
        before,
        after,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_processor::GeoBounds;

    fn grid_4x4() -> GridData {
        let values = (1..=16).map(|v| v as f32).collect();
        let mut grid =
            GridData::new(GeoBounds::new(0.0, 4.0, 4.0, 0.0), 4, 4, values, None).unwrap();
        grid.update_min_max();
        grid
    }

    #[test]
    fn test_resample_grid_refreshes_statistics() {
        let mut grid = grid_4x4();
        let config = ResamplerConfig {
            method: ResampleMethod::Max,
            ..Default::default()
        };
        let target = ResampleTarget::Counts {
            count_x: 2,
            count_y: 2,
        };

        resample_grid(&mut grid, &target, &config).unwrap();

        assert_eq!(grid.min_value, 6.0);
        assert_eq!(grid.max_value, 16.0);
        assert_eq!(grid.distribution.iter().sum::<u32>(), 4);
    }

    #[test]
    fn test_resample_grid_can_skip_statistics() {
        let mut grid = grid_4x4();
        let config = ResamplerConfig {
            update_statistics: false,
            ..Default::default()
        };

        resample_grid(&mut grid, &ResampleTarget::CellSize(2.0), &config).unwrap();

        assert_eq!((grid.count_x, grid.count_y), (2, 2));
        assert_eq!(grid.min_value, 1.0);
        assert!(grid.distribution.is_empty());
    }

    #[test]
    fn test_summary_without_valid_cells() {
        let mut grid = grid_4x4();
        grid.mask = Some(vec![0; 16]);
        let summary = GridSummary::of(&grid);

        assert_eq!(summary.valid_cells, 0);
        assert!(summary.masked);
        assert_eq!(summary.min_value, None);
    }

    #[test]
    fn test_target_display() {
        let target = ResampleTarget::Counts {
            count_x: 3,
            count_y: 2,
        };
        assert_eq!(target.to_string(), "3x2 cells");
        assert_eq!(ResampleTarget::CellSize(0.5).to_string(), "0.5° per cell");
    }
}
