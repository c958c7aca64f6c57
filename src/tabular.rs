//! Tab-delimited record parsing.
//!
//! The first non-blank line is the header. Header names are kept verbatim and
//! matched exactly; data cells are trimmed of surrounding whitespace.

use crate::error::{ChartError, ChartResult};

const FIELD_DELIMITER: char = '\t';

/// Header plus row grid parsed from delimited text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Parse tab-delimited text.
    ///
    /// Returns `None` when the text has no non-blank lines.
    pub fn parse(text: &str) -> Option<Self> {
        let mut lines = text
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.trim().is_empty());

        let header = lines
            .next()?
            .split(FIELD_DELIMITER)
            .map(str::to_string)
            .collect();
        let rows = lines
            .map(|line| {
                line.split(FIELD_DELIMITER)
                    .map(|cell| cell.trim().to_string())
                    .collect()
            })
            .collect();
        Some(Self { header, rows })
    }

    /// Parse fetched text, mapping empty text to [`ChartError::EmptyResource`].
    pub fn parse_resource(text: &str, url: &str) -> ChartResult<Self> {
        Self::parse(text).ok_or_else(|| ChartError::EmptyResource {
            url: url.to_string(),
        })
    }

    /// Header names in file order.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows in file order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Index of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|column| column == name)
    }

    /// Index of a column, or [`ChartError::MissingColumn`].
    pub fn require_column(&self, name: &str) -> ChartResult<usize> {
        self.column_index(name)
            .ok_or_else(|| ChartError::MissingColumn(name.to_string()))
    }
}

/// Cell text at `index`, if the row is long enough.
pub fn cell(row: &[String], index: usize) -> Option<&str> {
    row.get(index).map(String::as_str)
}

/// Parse a numeric cell; unparseable or non-finite text is absent data.
pub fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}
