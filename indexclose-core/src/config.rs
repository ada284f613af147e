//! Fetch configuration.

use chrono::NaiveDate;
use std::path::PathBuf;

use crate::data::yahoo::DEFAULT_BASE_URL;
use crate::data::FetchRequest;

/// S&P 500 index.
pub const DEFAULT_SYMBOL: &str = "^GSPC";

/// Output file written when none is given.
pub const DEFAULT_OUTPUT: &str = "sp500_data.csv";

/// First day of history requested.
pub fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1988, 1, 1).unwrap_or_default()
}

/// Everything one run of the pipeline needs.
///
/// The start date is fixed; only the symbol, output path and provider host
/// can be changed.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    /// Ticker symbol to fetch.
    pub symbol: String,

    /// First day of history (inclusive).
    pub start: NaiveDate,

    /// CSV file to (over)write.
    pub output: PathBuf,

    /// Provider host, without a trailing slash.
    pub base_url: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            start: default_start(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl FetchConfig {
    /// The provider request for this run: `start` through today.
    pub fn request(&self) -> FetchRequest {
        FetchRequest::until_today(self.symbol.clone(), self.start)
    }
}
