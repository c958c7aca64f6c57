//! Loaders that populate chart series from tab-delimited sources.
//!
//! Each loader performs exactly one fetch per `load` call. Structural
//! failures (fetch, empty resource, missing columns, bad configuration) are
//! returned before any series is touched. Row-level problems are skipped
//! row by row and never reported.
//!
//! Concurrent loads that target the same series are not coordinated; callers
//! serialize them.

mod date;
mod fetch;
mod histogram;

pub use date::DateSeriesLoader;
pub use fetch::{Fetcher, ReqwestFetcher};
pub use histogram::{DEFAULT_DISTRIBUTION_TITLE, HistogramSeriesLoader};

use crate::series::SeriesId;

/// Lifecycle of a loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    /// Required columns or bindings are not set yet.
    Unconfigured,
    /// Ready to load.
    Configured,
    /// A fetch is in flight.
    Loading,
    /// The last load completed.
    Loaded,
    /// The last load returned an error.
    Failed,
}

/// Outcome of a successful load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadSummary {
    /// Data rows read from the source (header excluded).
    pub rows: usize,
    /// Points appended across all series.
    pub points: usize,
    /// Series that were populated or created, in ascending handle order.
    pub series: Vec<SeriesId>,
}

/// Group a binding is restricted to.
///
/// [`GroupKey::Any`] is the "no group" sentinel: such bindings read every row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Every row.
    Any,
    /// Only rows whose group column equals this value.
    Key(String),
}

impl GroupKey {
    /// Check whether a row with the given group cell feeds this binding.
    pub fn matches(&self, row_group: Option<&str>) -> bool {
        match self {
            Self::Any => true,
            Self::Key(key) => row_group == Some(key.as_str()),
        }
    }
}
