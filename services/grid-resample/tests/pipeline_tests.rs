//! End-to-end tests of the resampling pipeline through temporary files.

use grid_common::csv::{read_csv_file, write_csv_file};
use grid_processor::{DataResolution, ResampleMethod, ResamplerConfig};
use grid_resample::{run, ResampleJob, ResampleTarget};
use test_utils::{checkerboard_mask, create_sequential_grid, with_mask};

fn job(dir: &tempfile::TempDir, target: ResampleTarget, method: ResampleMethod) -> ResampleJob {
    ResampleJob {
        input: dir.path().join("input.csv"),
        output: dir.path().join("out").join("resampled.csv"),
        target,
        config: ResamplerConfig {
            method,
            ..Default::default()
        },
    }
}

#[test]
fn test_max_job_writes_pooled_grid() {
    let dir = tempfile::tempdir().unwrap();
    let job = job(
        &dir,
        ResampleTarget::Counts {
            count_x: 2,
            count_y: 2,
        },
        ResampleMethod::Max,
    );
    write_csv_file(&create_sequential_grid(4, 4), &job.input).unwrap();

    let report = run(&job).unwrap();

    assert_eq!(report.before.count_x, 4);
    assert_eq!(report.after.count_x, 2);
    assert_eq!(report.after.valid_cells, 4);
    assert_eq!(report.after.min_value, Some(6.0));
    assert_eq!(report.after.max_value, Some(16.0));

    let written = read_csv_file(&job.output).unwrap();
    assert_eq!(written.values, vec![6.0, 8.0, 14.0, 16.0]);
    assert_eq!(written.mask, Some(vec![1, 1, 1, 1]));
}

#[test]
fn test_nearest_job_keeps_mask() {
    let dir = tempfile::tempdir().unwrap();
    let job = job(&dir, ResampleTarget::CellSize(2.0), ResampleMethod::Nearest);
    let grid = with_mask(create_sequential_grid(4, 4), checkerboard_mask(4, 4));
    write_csv_file(&grid, &job.input).unwrap();

    let report = run(&job).unwrap();
    assert!(report.after.masked);

    // Sampled cells (1,1), (3,1), (1,3), (3,3) are all valid in a checkerboard
    let written = read_csv_file(&job.output).unwrap();
    assert_eq!(written.values, vec![6.0, 8.0, 14.0, 16.0]);
    assert_eq!(written.mask, Some(vec![1, 1, 1, 1]));
}

#[test]
fn test_resolution_preset_job() {
    let dir = tempfile::tempdir().unwrap();
    // 1500" = 5/12 degree per cell, 12 one-degree cells wide -> ~29 cells: upsampling
    let world = DataResolution::preset("World").unwrap();
    let job = job(&dir, ResampleTarget::Resolution(world), ResampleMethod::Nearest);
    write_csv_file(&create_sequential_grid(12, 12), &job.input).unwrap();

    let err = run(&job).unwrap_err();
    assert!(format!("{:#}", err).contains("cannot increase resolution"));
}

#[test]
fn test_rejected_job_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let job = job(
        &dir,
        ResampleTarget::Counts {
            count_x: 3,
            count_y: 3,
        },
        ResampleMethod::Max,
    );
    write_csv_file(&create_sequential_grid(4, 4), &job.input).unwrap();

    let err = run(&job).unwrap_err();
    assert!(format!("{:#}", err).contains("not an integral multiple"));
    assert!(!job.output.exists());
}

#[test]
fn test_report_serializes_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let job = job(
        &dir,
        ResampleTarget::Counts {
            count_x: 1,
            count_y: 1,
        },
        ResampleMethod::Max,
    );
    write_csv_file(&create_sequential_grid(2, 2), &job.input).unwrap();

    let report = run(&job).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["method"], "max");
    assert_eq!(json["target"], "1x1 cells");
    assert_eq!(json["after"]["count_x"], 1);
    assert_eq!(json["after"]["max_value"], 4.0);
}
