//! Data acquisition and reshaping

pub mod frame;
pub mod provider;
pub mod yahoo;

pub use frame::{close_series, project, quotes_to_frame, ClosePoint, CloseSeries};
pub use provider::{
    DailyQuote, DataError, DataProvider, DataSource, FetchRequest, FetchResult, StaticProvider,
};
pub use yahoo::YahooProvider;
