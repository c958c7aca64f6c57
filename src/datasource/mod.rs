//! Series point storage.
//!
//! Two storage variants back every series: date-keyed points for line/bar
//! time series and raw values for distributions. Both preserve insertion
//! order and track value bounds incrementally as points are appended.

mod store;

pub use store::SeriesStore;

use std::fmt;

use chrono::NaiveDate;

use crate::view::Range;

const CANONICAL_DATE_FORMAT: &str = "%Y%m%d";

/// Calendar key of a time-series point.
///
/// Canonical keys are 8-digit `YYYYMMDD` strings, which makes lexical order
/// equal to chronological order. Tokens in other forms are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(String);

impl DateKey {
    /// Normalize a raw date token.
    ///
    /// `YYYY-MM-DD` is rewritten to `YYYYMMDD`; anything else passes through.
    pub fn normalize(token: &str) -> Self {
        let bytes = token.as_bytes();
        let dashed = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if dashed {
            Self(format!("{}{}{}", &token[0..4], &token[5..7], &token[8..10]))
        } else {
            Self(token.to_string())
        }
    }

    /// Access the key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the key is in canonical `YYYYMMDD` form.
    pub fn is_canonical(&self) -> bool {
        self.0.len() == 8 && self.0.bytes().all(|b| b.is_ascii_digit())
    }

    /// Parse a canonical key into a calendar date.
    pub fn to_date(&self) -> Option<NaiveDate> {
        if !self.is_canonical() {
            return None;
        }
        NaiveDate::parse_from_str(&self.0, CANONICAL_DATE_FORMAT).ok()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date.format(CANONICAL_DATE_FORMAT).to_string())
    }
}

/// A time-series point.
#[derive(Debug, Clone, PartialEq)]
pub struct DatePoint {
    /// Calendar key.
    pub key: DateKey,
    /// Point value.
    pub value: f64,
    /// Tooltip text; empty when the source supplied none.
    pub annotation: String,
}

impl DatePoint {
    /// Create a point without annotation.
    pub fn new(key: DateKey, value: f64) -> Self {
        Self {
            key,
            value,
            annotation: String::new(),
        }
    }

    /// Attach annotation text.
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = annotation.into();
        self
    }
}

/// Mode of the stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    /// Date-keyed points.
    Dated,
    /// Raw distribution values.
    Distribution,
}

/// Errors that can occur when appending data.
///
/// These indicate misuse of a series, such as appending a dated point to a
/// distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendError {
    /// Attempted to append with an incompatible data mode.
    WrongMode,
}

impl fmt::Display for AppendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongMode => f.write_str("point does not match the series data mode"),
        }
    }
}

impl std::error::Error for AppendError {}

/// Append-only point storage with incremental value bounds.
#[derive(Debug, Clone)]
pub(crate) enum SeriesData {
    Dated(Vec<DatePoint>),
    Distribution(Vec<f64>),
}

impl SeriesData {
    pub(crate) fn mode(&self) -> DataMode {
        match self {
            Self::Dated(_) => DataMode::Dated,
            Self::Distribution(_) => DataMode::Distribution,
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Dated(points) => points.len(),
            Self::Distribution(values) => values.len(),
        }
    }
}

pub(crate) fn expand_bounds(bounds: &mut Option<Range>, value: f64) {
    if !value.is_finite() {
        return;
    }
    match bounds {
        None => *bounds = Some(Range::point(value)),
        Some(range) => range.expand_to_include(value),
    }
}
