//! Test data generators for synthetic grids and masks.
//!
//! Generated grids cover one degree per cell, starting at 0°E / 0°S, so
//! cell sizes and coordinates are easy to reason about in tests.

use grid_common::{GeoBounds, GridData};

/// Bounds of a grid with one degree per cell, north-west corner at (0, count_y).
pub fn unit_bounds(count_x: usize, count_y: usize) -> GeoBounds {
    GeoBounds::new(0.0, count_x as f64, count_y as f64, 0.0)
}

/// Creates a grid whose values count up from 1 in row-major order.
///
/// # Example
///
/// ```
/// use test_utils::create_sequential_grid;
///
/// let grid = create_sequential_grid(4, 4);
/// assert_eq!(grid.values[0], 1.0);
/// assert_eq!(grid.values[15], 16.0);
/// ```
pub fn create_sequential_grid(count_x: usize, count_y: usize) -> GridData {
    let values = (1..=count_x * count_y).map(|v| v as f32).collect();
    GridData::new(unit_bounds(count_x, count_y), count_x, count_y, values, None)
        .expect("generated buffers match dimensions")
}

/// Creates a grid with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row`
///
/// This makes it easy to tell which source cell ended up in an output cell.
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(10, 5);
/// assert_eq!(grid.values.len(), 50);
/// assert_eq!(grid.values[1], 1000.0);  // col=1, row=0
/// assert_eq!(grid.values[10], 1.0);    // col=0, row=1
/// ```
pub fn create_test_grid(count_x: usize, count_y: usize) -> GridData {
    let mut values = Vec::with_capacity(count_x * count_y);
    for row in 0..count_y {
        for col in 0..count_x {
            values.push((col * 1000 + row) as f32);
        }
    }
    GridData::new(unit_bounds(count_x, count_y), count_x, count_y, values, None)
        .expect("generated buffers match dimensions")
}

/// Decode the `(col, row)` a value from [`create_test_grid`] came from.
pub fn test_grid_origin(value: f32) -> (usize, usize) {
    let value = value as usize;
    (value / 1000, value % 1000)
}

/// Creates an elevation-like grid with deterministic pseudo-random values.
///
/// Values range from 0 to 500 (meters).
pub fn create_elevation_grid(count_x: usize, count_y: usize, seed: u32) -> GridData {
    let mut values = Vec::with_capacity(count_x * count_y);
    for row in 0..count_y {
        for col in 0..count_x {
            let hash = simple_hash(col as u32, row as u32, seed);
            values.push((hash % 50_000) as f32 / 100.0);
        }
    }
    GridData::new(unit_bounds(count_x, count_y), count_x, count_y, values, None)
        .expect("generated buffers match dimensions")
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

/// Mask with alternating valid/invalid cells, valid at (0, 0).
pub fn checkerboard_mask(count_x: usize, count_y: usize) -> Vec<u8> {
    let mut mask = Vec::with_capacity(count_x * count_y);
    for row in 0..count_y {
        for col in 0..count_x {
            mask.push(u8::from((row + col) % 2 == 0));
        }
    }
    mask
}

/// Mask where a deterministic pseudo-random subset of cells is invalid.
///
/// Roughly one cell in `one_in` is marked invalid.
pub fn sparse_mask(count_x: usize, count_y: usize, one_in: u32, seed: u32) -> Vec<u8> {
    let mut mask = Vec::with_capacity(count_x * count_y);
    for row in 0..count_y {
        for col in 0..count_x {
            let hash = simple_hash(col as u32, row as u32, seed);
            mask.push(u8::from(hash % one_in.max(1) != 0));
        }
    }
    mask
}

/// Attach a mask to a generated grid.
pub fn with_mask(mut grid: GridData, mask: Vec<u8>) -> GridData {
    assert_eq!(mask.len(), grid.values.len(), "mask length must match grid");
    grid.mask = Some(mask);
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_grid() {
        let grid = create_sequential_grid(3, 2);
        assert_eq!(grid.values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(grid.bounds, GeoBounds::new(0.0, 3.0, 2.0, 0.0));
    }

    #[test]
    fn test_test_grid_origin() {
        let grid = create_test_grid(20, 10);
        let value = grid.values[7 * 20 + 13];
        assert_eq!(test_grid_origin(value), (13, 7));
    }

    #[test]
    fn test_elevation_grid_is_deterministic() {
        let a = create_elevation_grid(8, 8, 42);
        let b = create_elevation_grid(8, 8, 42);
        let c = create_elevation_grid(8, 8, 7);
        assert_eq!(a.values, b.values);
        assert_ne!(a.values, c.values);
        assert!(a.values.iter().all(|&v| (0.0..500.0).contains(&v)));
    }

    #[test]
    fn test_checkerboard_mask() {
        assert_eq!(checkerboard_mask(3, 2), vec![1, 0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_sparse_mask_has_some_invalid_cells() {
        let mask = sparse_mask(32, 32, 4, 1);
        let invalid = mask.iter().filter(|&&m| m == 0).count();
        assert!(invalid > 0 && invalid < mask.len());
    }
}
