//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over where daily quotes come from (Yahoo
//! Finance in production, a canned table in tests) so the pipeline never
//! depends on the network directly.

use chrono::NaiveDate;
use thiserror::Error;

/// One daily record as reported by a provider, before projection.
///
/// Prices are optional because providers report missing values as nulls.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyQuote {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub adj_close: Option<f64>,
    pub volume: Option<u64>,
}

impl DailyQuote {
    /// True when the provider reported nothing for this day (holiday placeholder).
    pub fn is_void(&self) -> bool {
        self.open.is_none()
            && self.high.is_none()
            && self.low.is_none()
            && self.close.is_none()
            && self.volume.is_none()
    }
}

/// Structured error types for fetch, projection and export.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("provider returned HTTP {status} for {symbol}")]
    HttpStatus { status: u16, symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("missing column '{column}' (available: {})", .available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("frame error: {0}")]
    FrameError(String),

    #[error("export error: {0}")]
    ExportError(String),
}

/// What to fetch: one symbol, daily bars from `start` through `end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FetchRequest {
    /// Request from `start` up to today.
    pub fn until_today(symbol: impl Into<String>, start: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            start,
            end: chrono::Utc::now().date_naive(),
        }
    }
}

/// Result of a successful fetch.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub symbol: String,
    pub quotes: Vec<DailyQuote>,
    pub source: DataSource,
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    YahooFinance,
    Static,
}

/// A source of daily quotes.
pub trait DataProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily quotes for a symbol, oldest first.
    fn fetch(&self, request: &FetchRequest) -> Result<FetchResult, DataError>;
}

/// Provider that hands back a fixed set of quotes, or a fixed failure.
///
/// Used to run the pipeline without the network.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    quotes: Vec<DailyQuote>,
    fail_with: Option<String>,
}

impl StaticProvider {
    pub fn new(quotes: Vec<DailyQuote>) -> Self {
        Self {
            quotes,
            fail_with: None,
        }
    }

    /// A provider whose every fetch fails as if the network were down.
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self {
            quotes: Vec::new(),
            fail_with: Some(reason.into()),
        }
    }
}

impl DataProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self, request: &FetchRequest) -> Result<FetchResult, DataError> {
        if let Some(reason) = &self.fail_with {
            return Err(DataError::NetworkUnreachable(reason.clone()));
        }

        let quotes: Vec<DailyQuote> = self
            .quotes
            .iter()
            .filter(|q| q.date >= request.start && q.date <= request.end)
            .cloned()
            .collect();

        if quotes.is_empty() {
            return Err(DataError::SymbolNotFound {
                symbol: request.symbol.clone(),
            });
        }

        Ok(FetchResult {
            symbol: request.symbol.clone(),
            quotes,
            source: DataSource::Static,
        })
    }
}
