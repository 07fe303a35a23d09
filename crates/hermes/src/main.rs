//! Hermes - Benchmark Runner for GeoBench
//!
//! Discovers benchmark cases, runs every target's probe for every case one
//! at a time, and prints a comparison table of the reported timings.

mod config;
mod constants;
mod discovery;
mod executor;
mod outcome;
mod runner;
mod table;
mod targets;

use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::discovery::CaseDiscoverer;
use crate::executor::ProcessExecutor;
use crate::runner::BenchmarkRunner;
use crate::table::TableRenderer;

/// Exit status when at least one cell failed
const EXIT_CELL_FAILURES: u8 = 1;

/// Exit status when the run could not start
const EXIT_FATAL: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing; stdout is reserved for the table
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hermes=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Hermes benchmark runner");

    match run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

async fn run() -> Result<ExitCode> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        "Datasets: points={} polygon={}",
        config.datasets.points().display(),
        config.datasets.polygon().display()
    );
    tracing::info!("Probe directory: {}", config.targets.probe_dir().display());
    for target in config.targets.targets() {
        tracing::debug!("Target '{}': {}", target.name, target.command.as_str());
    }

    // Discover cases before running anything
    let cases = CaseDiscoverer::new(&config.cases_dir)
        .discover()
        .context("Failed to discover benchmark cases")?;

    let executor = ProcessExecutor::new(config.execution.probe_timeout);
    let renderer = TableRenderer::new(&config.table);
    let runner = BenchmarkRunner::new(executor, config.targets, config.datasets);

    let matrix = runner.run(&cases).await;

    print!("{}", renderer.render(&matrix));

    let failures = matrix.failure_count();
    if failures == 0 {
        tracing::info!("All {} cell(s) completed", cases.len() * matrix.targets().len());
        return Ok(ExitCode::SUCCESS);
    }

    for (case, target, failure) in matrix.failures() {
        tracing::warn!("{} / {}: {}", case, target, failure);
    }
    tracing::warn!("{} cell(s) failed", failures);

    Ok(ExitCode::from(EXIT_CELL_FAILURES))
}
