//! IndexClose CLI — save an index's daily closing prices as CSV.
//!
//! With no arguments, fetches S&P 500 (`^GSPC`) daily history since
//! 1988-01-01 from Yahoo Finance, keeps the `Date` and `Close` columns, and
//! writes them to `sp500_data.csv`, replacing any previous file.

use anyhow::{Context, Result};
use clap::Parser;
use indexclose_core::config::{DEFAULT_OUTPUT, DEFAULT_SYMBOL};
use indexclose_core::data::yahoo::DEFAULT_BASE_URL;
use indexclose_core::{FetchConfig, YahooProvider};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "indexclose",
    version,
    about = "IndexClose — export an index's daily closing prices to CSV"
)]
struct Cli {
    /// Ticker symbol to fetch.
    #[arg(long, default_value = DEFAULT_SYMBOL)]
    symbol: String,

    /// CSV file to write. Overwritten if it exists.
    #[arg(long, short, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Provider host.
    #[arg(long, default_value = DEFAULT_BASE_URL, hide = true)]
    base_url: String,
}

impl Cli {
    fn into_config(self) -> FetchConfig {
        FetchConfig {
            symbol: self.symbol,
            output: self.output,
            base_url: self.base_url,
            ..FetchConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = cli.into_config();
    let provider =
        YahooProvider::with_base_url(&config.base_url).context("failed to set up provider")?;

    let report = indexclose_core::run(&config, &provider).with_context(|| {
        format!(
            "failed to save {} history to {}",
            config.symbol,
            config.output.display()
        )
    })?;

    print!("{}", report.preview);
    println!("Data saved to {}", report.output.display());

    Ok(())
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default: warnings only).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
