//! The in-memory quote table and its projection down to `Date, Close`.
//!
//! Fetched quotes become a Polars `DataFrame` carrying the provider's column
//! labels. Projection checks that every requested column exists before
//! selecting, so a provider that renames or drops a column fails with a
//! `MissingColumn` error naming what was actually there.

use super::provider::{DailyQuote, DataError};
use chrono::{DateTime, NaiveDate, Utc};
use polars::prelude::*;
use tracing::warn;

pub const DATE: &str = "Date";
pub const OPEN: &str = "Open";
pub const HIGH: &str = "High";
pub const LOW: &str = "Low";
pub const CLOSE: &str = "Close";
pub const ADJ_CLOSE: &str = "Adj Close";
pub const VOLUME: &str = "Volume";

/// Column order of the full quote table.
pub const QUOTE_COLUMNS: [&str; 7] = [DATE, OPEN, HIGH, LOW, CLOSE, ADJ_CLOSE, VOLUME];

/// Columns kept by the export.
pub const CLOSE_COLUMNS: [&str; 2] = [DATE, CLOSE];

/// One row of the projected table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Rows read out of a projected `Date, Close` table.
#[derive(Debug, Clone, Default)]
pub struct CloseSeries {
    pub points: Vec<ClosePoint>,
    /// Rows dropped because the provider reported no close.
    pub skipped_null_closes: usize,
}

fn epoch() -> NaiveDate {
    DateTime::<Utc>::UNIX_EPOCH.date_naive()
}

/// Convert fetched quotes into the full quote table, preserving row order.
pub fn quotes_to_frame(quotes: &[DailyQuote]) -> Result<DataFrame, DataError> {
    let epoch = epoch();
    let dates: Vec<i32> = quotes
        .iter()
        .map(|q| (q.date - epoch).num_days() as i32)
        .collect();
    let opens: Vec<Option<f64>> = quotes.iter().map(|q| q.open).collect();
    let highs: Vec<Option<f64>> = quotes.iter().map(|q| q.high).collect();
    let lows: Vec<Option<f64>> = quotes.iter().map(|q| q.low).collect();
    let closes: Vec<Option<f64>> = quotes.iter().map(|q| q.close).collect();
    let adj_closes: Vec<Option<f64>> = quotes.iter().map(|q| q.adj_close).collect();
    let volumes: Vec<Option<u64>> = quotes.iter().map(|q| q.volume).collect();

    DataFrame::new(vec![
        Column::new(DATE.into(), dates)
            .cast(&DataType::Date)
            .map_err(|e| DataError::FrameError(format!("date cast: {e}")))?,
        Column::new(OPEN.into(), opens),
        Column::new(HIGH.into(), highs),
        Column::new(LOW.into(), lows),
        Column::new(CLOSE.into(), closes),
        Column::new(ADJ_CLOSE.into(), adj_closes),
        Column::new(VOLUME.into(), volumes),
    ])
    .map_err(|e| DataError::FrameError(format!("dataframe creation: {e}")))
}

/// Select `columns` from `df`, in that order.
///
/// Every requested column must be present; the first absent one is reported
/// together with the columns the table does have.
pub fn project(df: &DataFrame, columns: &[&str]) -> Result<DataFrame, DataError> {
    let available: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    if let Some(missing) = columns
        .iter()
        .find(|col| !available.iter().any(|a| a == *col))
    {
        return Err(DataError::MissingColumn {
            column: missing.to_string(),
            available,
        });
    }

    df.select(columns.iter().copied())
        .map_err(|e| DataError::FrameError(format!("select: {e}")))
}

/// Read the `Date` and `Close` columns of a projected table.
///
/// Null closes are skipped and counted. A negative close is rejected.
pub fn close_series(df: &DataFrame) -> Result<CloseSeries, DataError> {
    let map_err = |e: PolarsError| DataError::FrameError(format!("column read: {e}"));

    let dates = df.column(DATE).map_err(map_err)?;
    let closes = df.column(CLOSE).map_err(map_err)?;

    let date_ca = dates
        .date()
        .map_err(|e| DataError::FrameError(format!("date column type: {e}")))?;
    let close_ca = closes
        .f64()
        .map_err(|e| DataError::FrameError(format!("close column type: {e}")))?;

    let epoch = epoch();
    let mut series = CloseSeries {
        points: Vec::with_capacity(df.height()),
        skipped_null_closes: 0,
    };

    for i in 0..df.height() {
        let days = date_ca
            .get(i)
            .ok_or_else(|| DataError::FrameError(format!("null date at row {i}")))?;
        let date = epoch + chrono::Duration::days(days as i64);

        let Some(close) = close_ca.get(i) else {
            series.skipped_null_closes += 1;
            continue;
        };
        if close.is_nan() || close < 0.0 {
            return Err(DataError::ValidationError(format!(
                "invalid close {close} on {date}"
            )));
        }

        series.points.push(ClosePoint { date, close });
    }

    if series.skipped_null_closes > 0 {
        warn!(
            skipped = series.skipped_null_closes,
            "dropped rows with no closing price"
        );
    }

    Ok(series)
}
