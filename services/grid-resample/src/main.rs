//! Grid resampling tool.
//!
//! Reads a CSV grid, reduces its resolution with nearest-neighbour or max
//! resampling, and writes the result with refreshed statistics. A JSON report
//! is printed to stdout.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{ArgGroup, Parser};
use grid_processor::{DataResolution, ResampleMethod, ResamplerConfig};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use grid_resample::{run, ResampleJob, ResampleTarget};

#[derive(Parser, Debug)]
#[command(name = "grid-resample")]
#[command(about = "Reduce the resolution of a CSV grid")]
#[command(group(
    ArgGroup::new("target")
        .required(true)
        .args(["count_x", "cell_size", "resolution"])
))]
struct Args {
    /// Input grid (CSV)
    #[arg(short, long, env = "GRID_INPUT")]
    input: PathBuf,

    /// Output grid (CSV)
    #[arg(short, long, env = "GRID_OUTPUT")]
    output: PathBuf,

    /// Resampling method: nearest or max
    #[arg(short, long, env = "RESAMPLE_METHOD")]
    method: Option<String>,

    /// Target number of columns
    #[arg(long, requires = "count_y", allow_negative_numbers = true)]
    count_x: Option<i64>,

    /// Target number of rows
    #[arg(long, requires = "count_x", allow_negative_numbers = true)]
    count_y: Option<i64>,

    /// Target cell size in degrees
    #[arg(long)]
    cell_size: Option<f64>,

    /// Target resolution preset (world, continent, region, city, neighbourhood)
    #[arg(long)]
    resolution: Option<String>,

    /// Drop out-of-range values from the distribution
    #[arg(long)]
    crop_distribution: bool,

    /// Keep the input statistics instead of recomputing them
    #[arg(long)]
    no_statistics: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    fn target(&self) -> Result<ResampleTarget> {
        if let (Some(count_x), Some(count_y)) = (self.count_x, self.count_y) {
            return Ok(ResampleTarget::Counts { count_x, count_y });
        }
        if let Some(degrees) = self.cell_size {
            return Ok(ResampleTarget::CellSize(degrees));
        }
        if let Some(name) = &self.resolution {
            return match DataResolution::preset(name) {
                Some(resolution) => Ok(ResampleTarget::Resolution(resolution)),
                None => bail!("Unknown resolution preset '{}'", name),
            };
        }
        bail!("No target resolution given")
    }

    fn config(&self) -> Result<ResamplerConfig> {
        let mut config = ResamplerConfig::from_env();
        if let Some(method) = &self.method {
            config.method = match ResampleMethod::parse(method) {
                Some(method) => method,
                None => bail!("Unknown resampling method '{}'", method),
            };
        }
        if self.crop_distribution {
            config.crop_distribution = true;
        }
        if self.no_statistics {
            config.update_statistics = false;
        }
        Ok(config)
    }
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so the JSON report on stdout stays parseable
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.json_logs)?;

    let job = ResampleJob {
        input: args.input.clone(),
        output: args.output.clone(),
        target: args.target()?,
        config: args.config()?,
    };

    let report = run(&job)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_method_reads_env() {
        let command = Args::command();
        let method = command
            .get_arguments()
            .find(|arg| arg.get_id() == "method")
            .unwrap();
        assert_eq!(
            method.get_env(),
            Some(std::ffi::OsStr::new("RESAMPLE_METHOD"))
        );
    }

    #[test]
    fn test_counts_target() {
        let args = Args::try_parse_from([
            "grid-resample", "-i", "in.csv", "-o", "out.csv", "--count-x", "2", "--count-y", "3",
        ])
        .unwrap();
        assert_eq!(
            args.target().unwrap(),
            ResampleTarget::Counts {
                count_x: 2,
                count_y: 3
            }
        );
    }

    #[test]
    fn test_target_is_required() {
        let result = Args::try_parse_from(["grid-resample", "-i", "in.csv", "-o", "out.csv"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let args = Args::try_parse_from([
            "grid-resample", "-i", "in.csv", "-o", "out.csv", "--cell-size", "0.5", "-m", "mean",
        ])
        .unwrap();
        assert!(args.config().is_err());
    }
}
