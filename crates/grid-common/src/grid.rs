//! Georeferenced raster grid with an optional validity mask.

use crate::bounds::GeoBounds;
use crate::error::{GridError, GridResult};

/// Number of histogram bins used by [`GridData::update_distribution`].
pub const DEFAULT_DISTRIBUTION_SIZE: usize = 50;

/// A rectangular grid of `f32` cells.
///
/// Values are stored row-major: `count_y` rows of `count_x` columns, row 0
/// being the northern edge. The optional mask holds one byte per cell
/// (0 = no data, 1 = valid); a grid without a mask treats every cell as valid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridData {
    /// Geographic extent of the grid.
    pub bounds: GeoBounds,
    /// Number of columns.
    pub count_x: usize,
    /// Number of rows.
    pub count_y: usize,
    /// Cell values, `count_x * count_y` long.
    pub values: Vec<f32>,
    /// Per-cell validity, same length as `values` when present.
    pub mask: Option<Vec<u8>>,
    /// Physical units (may be empty).
    pub units: String,
    /// Smallest valid value, see [`GridData::update_min_max`].
    pub min_value: f32,
    /// Largest valid value, see [`GridData::update_min_max`].
    pub max_value: f32,
    /// Histogram of valid values.
    pub distribution: Vec<u32>,
    /// Largest bin in `distribution`.
    pub max_distribution: u32,
}

impl GridData {
    /// Create a grid from existing buffers, checking their lengths.
    pub fn new(
        bounds: GeoBounds,
        count_x: usize,
        count_y: usize,
        values: Vec<f32>,
        mask: Option<Vec<u8>>,
    ) -> GridResult<Self> {
        let grid = Self {
            bounds,
            count_x,
            count_y,
            values,
            mask,
            units: String::new(),
            min_value: 0.0,
            max_value: 0.0,
            distribution: Vec::new(),
            max_distribution: 0,
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Create a zero-filled grid, with an all-invalid mask if requested.
    pub fn empty(bounds: GeoBounds, count_x: usize, count_y: usize, with_mask: bool) -> Self {
        let mut grid = Self {
            bounds,
            count_x,
            count_y,
            values: Vec::new(),
            mask: None,
            units: String::new(),
            min_value: 0.0,
            max_value: 0.0,
            distribution: Vec::new(),
            max_distribution: 0,
        };
        grid.init_values(with_mask);
        grid
    }

    /// Set the units, builder style.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Check the buffer length invariants.
    pub fn validate(&self) -> GridResult<()> {
        let expected = self.count_x.checked_mul(self.count_y);
        if expected != Some(self.values.len()) {
            return Err(GridError::DimensionMismatch {
                count_x: self.count_x,
                count_y: self.count_y,
                actual: self.values.len(),
            });
        }
        if let Some(mask) = &self.mask {
            if mask.len() != self.values.len() {
                return Err(GridError::MaskMismatch {
                    values: self.values.len(),
                    mask: mask.len(),
                });
            }
        }
        Ok(())
    }

    /// Reallocate the buffers for the current `count_x` and `count_y`.
    ///
    /// Old contents are discarded. Without `with_mask` the grid is left
    /// without a mask.
    pub fn init_values(&mut self, with_mask: bool) {
        let count = self.count_x.saturating_mul(self.count_y);
        self.values = vec![0.0; count];
        self.mask = if with_mask { Some(vec![0; count]) } else { None };
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether the cell at `index` holds valid data.
    pub fn is_valid(&self, index: usize) -> bool {
        match &self.mask {
            Some(mask) => mask.get(index).is_some_and(|&m| m == 1),
            None => index < self.values.len(),
        }
    }

    /// Number of cells holding valid data.
    pub fn valid_count(&self) -> usize {
        match &self.mask {
            Some(mask) => mask.iter().filter(|&&m| m == 1).count(),
            None => self.values.len(),
        }
    }

    /// Cell index containing a coordinate, or `None` outside the grid.
    pub fn index_of(&self, lon: f64, lat: f64) -> Option<usize> {
        if self.count_x == 0 || self.count_y == 0 || !self.bounds.contains(lon, lat) {
            return None;
        }

        let b = &self.bounds;
        let x = (self.count_x as f64 * (lon - b.west) / (b.east - b.west)) as usize;
        let y = (self.count_y as f64 * (lat - b.north) / (b.south - b.north)) as usize;

        // The east and south edges belong to the last column/row
        let x = x.min(self.count_x - 1);
        let y = y.min(self.count_y - 1);
        Some(y * self.count_x + x)
    }

    /// Raw value at a coordinate, ignoring the mask.
    pub fn value_at(&self, lon: f64, lat: f64) -> Option<f32> {
        self.index_of(lon, lat)
            .and_then(|index| self.values.get(index).copied())
    }

    /// Value at a coordinate, `None` for cells without data.
    pub fn cell_at(&self, lon: f64, lat: f64) -> Option<f32> {
        let index = self.index_of(lon, lat)?;
        if self.is_valid(index) {
            self.values.get(index).copied()
        } else {
            None
        }
    }

    /// Longitude of the centre of the cell at `index`.
    pub fn longitude_of(&self, index: usize) -> f64 {
        let x = index % self.count_x;
        (x as f64 + 0.5) * self.bounds.width() / self.count_x as f64 + self.bounds.west
    }

    /// Latitude of the centre of the cell at `index`.
    pub fn latitude_of(&self, index: usize) -> f64 {
        let y = index / self.count_x;
        (y as f64 + 0.5) * (self.bounds.south - self.bounds.north) / self.count_y as f64
            + self.bounds.north
    }

    /// Degrees per cell along X.
    pub fn cell_size(&self) -> f64 {
        self.bounds.width() / self.count_x as f64
    }

    /// Move a coordinate to the centre of the cell that contains it.
    pub fn snap_to_center(&self, lon: f64, lat: f64) -> (f64, f64) {
        let b = &self.bounds;
        let x = (self.count_x as f64 * (lon - b.west) / b.width()).trunc();
        let y = (self.count_y as f64 * (lat - b.north) / (b.south - b.north)).trunc();
        (
            (x + 0.5) * b.width() / self.count_x as f64 + b.west,
            (y + 0.5) * (b.south - b.north) / self.count_y as f64 + b.north,
        )
    }

    /// Convert a cell size in degrees to cell counts over this grid's extent.
    ///
    /// Counts are rounded to the nearest integer. A non-finite or
    /// non-positive cell size gives a count of 0.
    pub fn calculate_resolution(&self, deg_per_cell_x: f64, deg_per_cell_y: f64) -> (i64, i64) {
        fn cells(extent: f64, deg_per_cell: f64) -> i64 {
            if !deg_per_cell.is_finite() || deg_per_cell <= 0.0 {
                return 0;
            }
            (extent.abs() / deg_per_cell).round() as i64
        }

        (
            cells(self.bounds.width(), deg_per_cell_x),
            cells(self.bounds.height(), deg_per_cell_y),
        )
    }

    /// Recompute `min_value`/`max_value` over valid cells.
    ///
    /// With no valid cell the pair stays at `(f32::MAX, f32::MIN)`.
    pub fn update_min_max(&mut self) {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for (index, &value) in self.values.iter().enumerate() {
            if self.is_valid(index) {
                min = min.min(value);
                max = max.max(value);
            }
        }
        self.min_value = min;
        self.max_value = max;
    }

    /// Rebuild the value histogram from `min_value`/`max_value`.
    ///
    /// Integer grids with a small range (3 to 20 values) get one bin per
    /// integer unless `crop` is set. With `crop`, values outside the
    /// min/max range are dropped.
    pub fn update_distribution(&mut self, crop: bool) {
        let (min, max) = (self.min_value, self.max_value);

        let mut size = DEFAULT_DISTRIBUTION_SIZE;
        // Span checked as a float: huge ranges would overflow an integer
        let span = max - min;
        if !crop && (2.0..20.0).contains(&span) && min == min.floor() && max == max.floor() {
            size = span as usize + 1;
        }

        let last_bin = size - 1;
        let inv_range = if (max - min).abs() > 0.0001 {
            last_bin as f32 / (max - min)
        } else {
            0.0
        };

        let mut distribution = vec![0u32; size];
        let mut max_distribution = 0;
        for (index, &value) in self.values.iter().enumerate() {
            if !self.is_valid(index) {
                continue;
            }
            let bin = if crop {
                ((value - min) * inv_range).round()
            } else {
                ((value - min) * inv_range + 0.4999).trunc()
            };
            if bin < 0.0 || bin > last_bin as f32 {
                continue;
            }
            let bin = bin as usize;
            distribution[bin] += 1;
            max_distribution = max_distribution.max(distribution[bin]);
        }

        self.distribution = distribution;
        self.max_distribution = max_distribution;
    }
}
