//! Atlas - point-in-polygon timing probe
//!
//! Usage: `atlas <POINTS> <POLYGON>`
//!
//! Loads both GeoJSON datasets, prepares the polygons, then times only the
//! loop that tests every point against the polygon set. Prints a single
//! protocol line to stdout; logs go to stderr.

mod loader;
mod prepared;
mod probe;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use geobench_common::ProbeReport;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::loader::{ProbeError, load_points, load_polygons};
use crate::prepared::PolygonSet;
use crate::probe::{Measurement, measure_contains};

#[derive(Parser, Debug)]
#[command(name = "atlas")]
#[command(about = "Times point-in-polygon containment with the geo crate")]
struct Args {
    /// GeoJSON file with the query points
    points: PathBuf,

    /// GeoJSON file with the polygon or multipolygon collection
    polygon: PathBuf,

    /// Output line format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Skip the bounding-box preparation step
    #[arg(long)]
    no_prepare: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// `{"status":"ok","elapsed_ms":N,...}`
    Json,
    /// Bare integer milliseconds
    Plain,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atlas=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(measurement) => {
            tracing::info!(
                "{} of {} points contained in {:?}",
                measurement.contained,
                measurement.points,
                measurement.elapsed
            );
            let line = match args.format {
                OutputFormat::Json => ProbeReport::measured(
                    measurement.elapsed_ms(),
                    measurement.contained,
                    measurement.points,
                )
                .to_line(),
                OutputFormat::Plain => measurement.elapsed_ms().to_string(),
            };
            println!("{}", line);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            if args.format == OutputFormat::Json {
                println!("{}", ProbeReport::error(e.to_string()).to_line());
            }
            ExitCode::FAILURE
        }
    }
}

/// Load, prepare, measure, release
fn run(args: &Args) -> Result<Measurement, ProbeError> {
    let points = load_points(&args.points)?;
    let polygons = PolygonSet::new(load_polygons(&args.polygon)?, !args.no_prepare);
    tracing::debug!(
        "Testing {} point(s) against {} polygon part(s)",
        points.len(),
        polygons.len()
    );

    let measurement = measure_contains(&points, &polygons);

    // Release geometry after the timer has stopped
    drop(polygons);
    drop(points);

    Ok(measurement)
}
