//! IndexClose Core — fetch an index's daily history, project it, and export it.
//!
//! The whole program is one pipeline:
//! - `data::provider` / `data::yahoo`: fetch daily quotes for one symbol
//! - `data::frame`: hold them as a table and project to `Date, Close`
//! - `export`: write the projected rows as CSV, overwriting any prior file
//! - `pipeline`: run the three steps in order

pub mod config;
pub mod data;
pub mod export;
pub mod pipeline;

pub use config::FetchConfig;
pub use data::{DataError, DataProvider, StaticProvider, YahooProvider};
pub use pipeline::{run, PipelineReport};
