//! Fetch → project → export, once.

use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::FetchConfig;
use crate::data::frame::{self, CLOSE_COLUMNS};
use crate::data::{DataError, DataProvider};
use crate::export::{self, PREVIEW_ROWS};

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub symbol: String,
    pub output: PathBuf,
    pub rows: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub skipped_null_closes: usize,
    /// First rows of the export, formatted for printing.
    pub preview: String,
}

/// Run the pipeline for `config` against `provider`.
///
/// The output file is only touched after the fetch and projection have
/// succeeded, so a provider failure leaves any existing file as it was.
pub fn run(config: &FetchConfig, provider: &dyn DataProvider) -> Result<PipelineReport, DataError> {
    let request = config.request();
    debug!(
        provider = provider.name(),
        symbol = %request.symbol,
        start = %request.start,
        end = %request.end,
        "fetching"
    );

    let fetched = provider.fetch(&request)?;
    debug!(rows = fetched.quotes.len(), source = ?fetched.source, "fetched");

    let table = frame::quotes_to_frame(&fetched.quotes)?;
    let projected = frame::project(&table, &CLOSE_COLUMNS)?;
    let series = frame::close_series(&projected)?;

    let rows = export::write_close_csv(&config.output, &series.points)?;
    info!(
        symbol = %fetched.symbol,
        rows,
        output = %config.output.display(),
        "export complete"
    );

    Ok(PipelineReport {
        symbol: fetched.symbol,
        output: config.output.clone(),
        rows,
        first_date: series.points.first().map(|p| p.date),
        last_date: series.points.last().map(|p| p.date),
        skipped_null_closes: series.skipped_null_closes,
        preview: export::render_preview(&series.points, PREVIEW_ROWS),
    })
}
