//! Command-line interface and the end-to-end run.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::pipeline::{BatchSummary, DEFAULT_WORKERS, ItemResult, Pipeline, PipelineConfig};
use crate::resolver::{HttpResolver, ResolveError, Resolver, ResolverConfig};
use crate::table::{TableError, read_batch, write_batch};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Parser)]
#[command(name = "station-resolver")]
#[command(about = "Resolve Japanese station names to prefecture addresses")]
#[command(version)]
pub struct Cli {
    /// Input CSV: a header row, then one station per row in the first column
    #[arg(short, long, default_value = "csv/input.csv")]
    pub input: PathBuf,

    /// Output CSV: one address (or ERROR) per input row
    #[arg(short, long, default_value = "csv/output.csv")]
    pub output: PathBuf,

    /// Number of concurrent workers
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Station API base URL
    #[arg(long, env = "STATION_API_URL")]
    pub station_url: Option<String>,

    /// Postal code API base URL
    #[arg(long, env = "POSTAL_API_URL")]
    pub postal_url: Option<String>,

    /// Ignore proxy settings from the environment
    #[arg(long)]
    pub no_proxy: bool,

    /// Log per-item details
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn resolver_config(&self) -> ResolverConfig {
        let mut config = ResolverConfig::new().with_timeout(self.timeout);
        if let Some(url) = &self.station_url {
            config = config.with_station_url(url);
        }
        if let Some(url) = &self.postal_url {
            config = config.with_address_url(url);
        }
        if self.no_proxy {
            config = config.with_no_proxy();
        }
        config
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new(self.workers)
    }

    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "station_resolver=debug,info"
        } else {
            "info"
        }
    }
}

/// Errors that abort a whole run.
///
/// Per-item lookup failures never surface here; they become error cells.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("failed to create resolver: {0}")]
    Resolver(#[from] ResolveError),
}

/// Resolve the input table over HTTP and write the output table.
pub async fn run(cli: &Cli) -> Result<BatchSummary, AppError> {
    let resolver = HttpResolver::new(cli.resolver_config())?;
    run_with(cli, resolver).await
}

/// Resolve the input table with `resolver` and write the output table.
pub async fn run_with<R: Resolver + 'static>(
    cli: &Cli,
    resolver: R,
) -> Result<BatchSummary, AppError> {
    let records = read_batch(&cli.input)?;
    info!(rows = records.len(), input = %cli.input.display(), "Loaded input");

    let pipeline = Pipeline::new(resolver, cli.pipeline_config());
    let results = pipeline.run(records).await;
    let summary = BatchSummary::from_results(&results);

    let column: Vec<&str> = results.iter().map(ItemResult::render).collect();
    write_batch(&cli.output, &column)?;

    info!(
        output = %cli.output.display(),
        total = summary.total,
        resolved = summary.resolved,
        empty = summary.empty,
        no_match = summary.no_match,
        failed = summary.failed,
        "Wrote output"
    );

    Ok(summary)
}
