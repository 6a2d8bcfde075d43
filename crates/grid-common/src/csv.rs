//! Line-oriented CSV grid format.
//!
//! ```text
//! West,103.6
//! North,1.47
//! East,104.1
//! South,1.2
//! Count X,4
//! Count Y,3
//! Units,m
//! VALUE,
//! 12.5,1
//! 0,0
//! ...
//! ```
//!
//! Header keys are case-insensitive and unknown keys are skipped. Each row
//! after `VALUE` is a cell value followed by its mask flag (1 = valid).

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::bounds::GeoBounds;
use crate::error::{GridError, GridResult};
use crate::grid::GridData;

#[derive(Default)]
struct Header {
    west: Option<f64>,
    east: Option<f64>,
    north: Option<f64>,
    south: Option<f64>,
    count_x: Option<usize>,
    count_y: Option<usize>,
    units: String,
}

fn parse_field<T: std::str::FromStr>(line: usize, key: &str, value: &str) -> GridResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| GridError::parse(line, format!("invalid {} value '{}'", key, value.trim())))
}

fn required<T>(value: Option<T>, name: &str) -> GridResult<T> {
    value.ok_or_else(|| GridError::missing_field(name))
}

/// Read a grid from CSV text.
///
/// The returned grid always carries a mask, and its min/max and
/// distribution are computed.
pub fn read_csv<R: BufRead>(reader: R) -> GridResult<GridData> {
    let mut header = Header::default();
    let mut values = Vec::new();
    let mut mask = Vec::new();
    let mut in_values = false;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = i + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut cells = line.split(',');
        let first = cells.next().unwrap_or_default().trim();
        let second = cells.next().unwrap_or_default();

        if in_values {
            values.push(parse_field::<f32>(line_number, "cell", first)?);
            let flag: i32 = parse_field(line_number, "mask", second)?;
            mask.push(u8::from(flag == 1));
            continue;
        }

        match first.to_ascii_lowercase().as_str() {
            "west" => header.west = Some(parse_field(line_number, first, second)?),
            "east" => header.east = Some(parse_field(line_number, first, second)?),
            "north" => header.north = Some(parse_field(line_number, first, second)?),
            "south" => header.south = Some(parse_field(line_number, first, second)?),
            "count x" => header.count_x = Some(parse_field(line_number, first, second)?),
            "count y" => header.count_y = Some(parse_field(line_number, first, second)?),
            "units" => header.units = second.trim().to_string(),
            "value" => in_values = true,
            _ => {}
        }
    }

    let bounds = GeoBounds::new(
        required(header.west, "West")?,
        required(header.east, "East")?,
        required(header.north, "North")?,
        required(header.south, "South")?,
    );
    let count_x = required(header.count_x, "Count X")?;
    let count_y = required(header.count_y, "Count Y")?;
    if !in_values {
        return Err(GridError::missing_field("VALUE"));
    }

    let mut grid = GridData::new(bounds, count_x, count_y, values, Some(mask))?
        .with_units(header.units);
    grid.update_min_max();
    grid.update_distribution(false);

    tracing::debug!(
        count_x = grid.count_x,
        count_y = grid.count_y,
        valid = grid.valid_count(),
        "Read CSV grid"
    );

    Ok(grid)
}

/// Read a grid from a CSV file.
pub fn read_csv_file(path: impl AsRef<Path>) -> GridResult<GridData> {
    let file = File::open(path.as_ref())?;
    read_csv(BufReader::new(file))
}

/// Write a grid as CSV text.
///
/// Grids without a mask are written with every cell marked valid.
pub fn write_csv<W: Write>(grid: &GridData, mut writer: W) -> GridResult<()> {
    grid.validate()?;

    let b = &grid.bounds;
    writeln!(writer, "West,{}", b.west)?;
    writeln!(writer, "North,{}", b.north)?;
    writeln!(writer, "East,{}", b.east)?;
    writeln!(writer, "South,{}", b.south)?;
    writeln!(writer, "Count X,{}", grid.count_x)?;
    writeln!(writer, "Count Y,{}", grid.count_y)?;
    if !grid.units.is_empty() {
        writeln!(writer, "Units,{}", grid.units)?;
    }
    writeln!(writer, "VALUE,")?;

    for (index, value) in grid.values.iter().enumerate() {
        writeln!(writer, "{},{}", value, u8::from(grid.is_valid(index)))?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a grid to a CSV file, replacing any existing file.
pub fn write_csv_file(grid: &GridData, path: impl AsRef<Path>) -> GridResult<()> {
    let file = File::create(path.as_ref())?;
    write_csv(grid, BufWriter::new(file))
}
