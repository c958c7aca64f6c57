//! Distribution series loader.

use std::collections::BTreeMap;

use crate::chart::Chart;
use crate::error::{ChartError, ChartResult};
use crate::loader::{Fetcher, LoadSummary, LoaderState};
use crate::series::Series;
use crate::tabular::{Table, cell, parse_number};

/// Title of the ungrouped series when the chart has no title.
pub const DEFAULT_DISTRIBUTION_TITLE: &str = "Distribution";

/// Loads a value column into newly created distribution series.
///
/// Without a group column every numeric value lands in one series named
/// after the chart. With a group column, one series is created per distinct
/// non-empty group value, in lexical order. Each new series takes the chart's
/// next palette color, so colors follow creation order across the chart.
#[derive(Debug, Clone)]
pub struct HistogramSeriesLoader {
    url: String,
    value_column: Option<String>,
    group_column: Option<String>,
    state: LoaderState,
}

impl HistogramSeriesLoader {
    /// Create an unconfigured loader for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            value_column: None,
            group_column: None,
            state: LoaderState::Unconfigured,
        }
    }

    /// Set the column holding sample values.
    pub fn value_column(mut self, name: impl Into<String>) -> Self {
        self.value_column = Some(name.into());
        self.state = LoaderState::Configured;
        self
    }

    /// Fan rows out into one series per value of this column.
    pub fn group_column(mut self, name: impl Into<String>) -> Self {
        self.group_column = Some(name.into());
        self
    }

    /// Access the source URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LoaderState {
        self.state
    }

    /// Fetch the source and add the resulting distribution series to `chart`.
    pub async fn load<F>(&mut self, fetcher: &F, chart: &mut Chart) -> ChartResult<LoadSummary>
    where
        F: Fetcher + ?Sized,
    {
        let Some(value_column) = self.value_column.clone() else {
            return Err(ChartError::InvalidConfiguration(
                "histogram loader needs a value column".to_string(),
            ));
        };
        self.state = LoaderState::Loading;
        let result = self.load_into(&value_column, fetcher, chart).await;
        self.state = if result.is_ok() {
            LoaderState::Loaded
        } else {
            LoaderState::Failed
        };
        result
    }

    async fn load_into<F>(
        &self,
        value_column: &str,
        fetcher: &F,
        chart: &mut Chart,
    ) -> ChartResult<LoadSummary>
    where
        F: Fetcher + ?Sized,
    {
        let text = fetcher.fetch(&self.url).await?;
        let table = Table::parse_resource(&text, &self.url)?;
        let value_index = table.require_column(value_column)?;
        let group_index = self
            .group_column
            .as_deref()
            .map(|name| table.require_column(name))
            .transpose()?;

        let buckets: Vec<(String, Vec<f64>)> = match group_index {
            None => {
                let title = chart.title().unwrap_or(DEFAULT_DISTRIBUTION_TITLE);
                let values: Vec<f64> = table
                    .rows()
                    .iter()
                    .filter_map(|row| cell(row, value_index).and_then(parse_number))
                    .collect();
                vec![(title.to_string(), values)]
            }
            Some(group_index) => group_values(&table, value_index, group_index)
                .into_iter()
                .collect(),
        };

        let mut summary = LoadSummary {
            rows: table.rows().len(),
            ..LoadSummary::default()
        };
        for (title, values) in buckets {
            let mut series = Series::histogram(title, chart.next_color());
            summary.points += series
                .extend_values(values)
                .map_err(|e| ChartError::InvalidConfiguration(e.to_string()))?;
            summary.series.push(chart.add_series(series));
        }

        tracing::debug!(
            url = %self.url,
            rows = summary.rows,
            points = summary.points,
            series = summary.series.len(),
            "loaded distributions"
        );
        Ok(summary)
    }
}

/// Bucket values by raw group cell; rows without a group are dropped.
fn group_values(
    table: &Table,
    value_index: usize,
    group_index: usize,
) -> BTreeMap<String, Vec<f64>> {
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for row in table.rows() {
        let Some(group) = cell(row, group_index).filter(|group| !group.is_empty()) else {
            continue;
        };
        let bucket = groups.entry(group.to_string()).or_default();
        if let Some(value) = cell(row, value_index).and_then(parse_number) {
            bucket.push(value);
        }
    }
    groups
}
