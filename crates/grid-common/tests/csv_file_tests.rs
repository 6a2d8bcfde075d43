//! File-based tests for the CSV grid codec.

use grid_common::csv::{read_csv_file, write_csv_file};
use grid_common::{GeoBounds, GridData, GridError};

fn sample_grid() -> GridData {
    let values = vec![0.5, 1.5, 2.5, 3.5, 4.5, 5.5];
    let mask = vec![1, 1, 0, 1, 1, 1];
    GridData::new(GeoBounds::new(103.6, 104.1, 1.47, 1.2), 3, 2, values, Some(mask))
        .unwrap()
        .with_units("people/km2")
}

#[test]
fn test_file_round_trip_keeps_values_and_mask() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("population.csv");

    let grid = sample_grid();
    write_csv_file(&grid, &path).unwrap();
    let loaded = read_csv_file(&path).unwrap();

    assert_eq!(loaded.count_x, 3);
    assert_eq!(loaded.count_y, 2);
    assert_eq!(loaded.values, grid.values);
    assert_eq!(loaded.mask, grid.mask);
    assert_eq!(loaded.units, "people/km2");
    assert!((loaded.bounds.west - 103.6).abs() < 1e-12);
    assert!((loaded.bounds.south - 1.2).abs() < 1e-12);
}

#[test]
fn test_loaded_statistics_ignore_masked_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stats.csv");

    let mut grid = sample_grid();
    // The masked cell holds the extreme value
    grid.values[2] = 1000.0;
    write_csv_file(&grid, &path).unwrap();

    let loaded = read_csv_file(&path).unwrap();
    assert_eq!(loaded.min_value, 0.5);
    assert_eq!(loaded.max_value, 5.5);
    assert_eq!(loaded.distribution.iter().sum::<u32>(), 5);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_csv_file(dir.path().join("missing.csv"));
    assert!(matches!(result, Err(GridError::Io(_))));
}

#[test]
fn test_bounds_serialize_as_named_edges() {
    let json = serde_json::to_value(GeoBounds::new(1.0, 2.0, 4.0, 3.0)).unwrap();
    assert_eq!(json["west"], 1.0);
    assert_eq!(json["east"], 2.0);
    assert_eq!(json["north"], 4.0);
    assert_eq!(json["south"], 3.0);
}
