//! Error types for loading and geometry configuration.

use thiserror::Error;

use crate::series::SeriesId;

/// Errors surfaced to the caller of a load or a geometry computation.
///
/// Row-level problems (unparseable numbers, short rows, missing group keys)
/// are never reported here; the loaders skip those rows.
#[derive(Error, Debug)]
pub enum ChartError {
    /// The source answered with a non-success HTTP status.
    #[error("Failed to fetch {url}: HTTP {status}")]
    Fetch { url: String, status: u16 },

    /// The request never produced a response.
    #[error("Network error fetching {url}: {message}")]
    Network { url: String, message: String },

    /// The source had no non-blank lines.
    #[error("Empty resource: {url}")]
    EmptyResource { url: String },

    /// A configured column is absent from the header row.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Configuration that cannot produce valid output (zero bin width, unconfigured loader, ...).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A binding or lookup referenced a series that the chart does not own.
    #[error("Unknown series: {0:?}")]
    UnknownSeries(SeriesId),

    /// Chart configuration JSON could not be parsed.
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for chart operations.
pub type ChartResult<T> = Result<T, ChartError>;
