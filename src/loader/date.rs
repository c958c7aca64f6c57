//! Date-keyed series loader.

use std::collections::BTreeMap;

use crate::chart::Chart;
use crate::datasource::{DataMode, DateKey, DatePoint};
use crate::error::{ChartError, ChartResult};
use crate::loader::{Fetcher, GroupKey, LoadSummary, LoaderState};
use crate::series::SeriesId;
use crate::tabular::{Table, cell, parse_number};

/// Column binding for one target series.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Binding {
    series: SeriesId,
    column: String,
    group: GroupKey,
}

/// Binding with its column resolved against a header.
struct ResolvedBinding<'a> {
    series: SeriesId,
    column: usize,
    group: &'a GroupKey,
}

/// Loads date-keyed values from a tab-delimited source into existing series.
///
/// ```no_run
/// # async fn run() -> tabchart::ChartResult<()> {
/// use tabchart::{Chart, Color, DateSeriesLoader, ReqwestFetcher, Series};
///
/// let mut chart = Chart::new();
/// let sales = chart.add_series(Series::line("Sales", Color::BLACK));
/// let mut loader = DateSeriesLoader::new("https://example.com/sales.tsv")
///     .date_column("date")
///     .bind(sales, "sales");
/// loader.load(&ReqwestFetcher::new()?, &mut chart).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DateSeriesLoader {
    url: String,
    date_column: Option<String>,
    group_column: Option<String>,
    bindings: Vec<Binding>,
    state: LoaderState,
}

impl DateSeriesLoader {
    /// Create an unconfigured loader for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            date_column: None,
            group_column: None,
            bindings: Vec::new(),
            state: LoaderState::Unconfigured,
        }
    }

    /// Set the column holding the date key.
    pub fn date_column(mut self, name: impl Into<String>) -> Self {
        self.date_column = Some(name.into());
        self.refresh_state()
    }

    /// Set the column whose value selects group-bound bindings.
    pub fn group_column(mut self, name: impl Into<String>) -> Self {
        self.group_column = Some(name.into());
        self.refresh_state()
    }

    /// Bind a value column to a series for every row.
    pub fn bind(self, series: SeriesId, column: impl Into<String>) -> Self {
        self.push_binding(series, column.into(), GroupKey::Any)
    }

    /// Bind a value column to a series for rows of one group only.
    pub fn bind_group(
        self,
        series: SeriesId,
        column: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        self.push_binding(series, column.into(), GroupKey::Key(group.into()))
    }

    /// Access the source URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LoaderState {
        self.state
    }

    /// Fetch the source and append its values to the bound series.
    ///
    /// Points are appended per series in lexical date order; rows whose date,
    /// value, or group cell is unusable are skipped for the affected bindings.
    ///
    /// A series is filled by exactly one load. Loading again after success,
    /// or into a series that already holds points, is rejected before the
    /// fetch.
    pub async fn load<F>(&mut self, fetcher: &F, chart: &mut Chart) -> ChartResult<LoadSummary>
    where
        F: Fetcher + ?Sized,
    {
        if self.state == LoaderState::Unconfigured {
            return Err(ChartError::InvalidConfiguration(
                "date loader needs a date column and at least one binding".to_string(),
            ));
        }
        if self.state == LoaderState::Loaded {
            return Err(ChartError::InvalidConfiguration(format!(
                "{} has already been loaded",
                self.url
            )));
        }
        self.state = LoaderState::Loading;
        let result = self.load_into(fetcher, chart).await;
        self.state = if result.is_ok() {
            LoaderState::Loaded
        } else {
            LoaderState::Failed
        };
        result
    }

    async fn load_into<F>(&self, fetcher: &F, chart: &mut Chart) -> ChartResult<LoadSummary>
    where
        F: Fetcher + ?Sized,
    {
        self.validate_targets(chart)?;
        let text = fetcher.fetch(&self.url).await?;
        let table = Table::parse_resource(&text, &self.url)?;

        let date_column = self.date_column.as_deref().unwrap_or_default();
        let date_index = table.require_column(date_column)?;
        let group_index = self
            .group_column
            .as_deref()
            .map(|name| table.require_column(name))
            .transpose()?;
        let bindings = self
            .bindings
            .iter()
            .map(|binding| {
                Ok(ResolvedBinding {
                    series: binding.series,
                    column: table.require_column(&binding.column)?,
                    group: &binding.group,
                })
            })
            .collect::<ChartResult<Vec<_>>>()?;

        let mut accumulated = collect_points(&table, date_index, group_index, &bindings);
        let mut summary = LoadSummary {
            rows: table.rows().len(),
            ..LoadSummary::default()
        };
        for (id, points) in &mut accumulated {
            points.sort_by(|a, b| a.key.cmp(&b.key));
            let series = chart.get_mut(*id).ok_or(ChartError::UnknownSeries(*id))?;
            summary.points += series
                .extend_date_points(points.drain(..))
                .map_err(|e| ChartError::InvalidConfiguration(e.to_string()))?;
            summary.series.push(*id);
        }

        tracing::debug!(
            url = %self.url,
            rows = summary.rows,
            points = summary.points,
            series = summary.series.len(),
            "loaded date series"
        );
        Ok(summary)
    }

    fn validate_targets(&self, chart: &Chart) -> ChartResult<()> {
        for binding in &self.bindings {
            let series = chart
                .get(binding.series)
                .ok_or(ChartError::UnknownSeries(binding.series))?;
            if series.data_mode() != DataMode::Dated {
                return Err(ChartError::InvalidConfiguration(format!(
                    "series '{}' does not hold dated points",
                    series.title()
                )));
            }
            if !series.is_empty() {
                return Err(ChartError::InvalidConfiguration(format!(
                    "series '{}' is already populated",
                    series.title()
                )));
            }
            if let GroupKey::Key(key) = &binding.group
                && self.group_column.is_none()
            {
                return Err(ChartError::InvalidConfiguration(format!(
                    "binding for group '{key}' needs a group column"
                )));
            }
        }
        Ok(())
    }

    fn push_binding(mut self, series: SeriesId, column: String, group: GroupKey) -> Self {
        self.bindings.push(Binding {
            series,
            column,
            group,
        });
        self.refresh_state()
    }

    fn refresh_state(mut self) -> Self {
        self.state = if self.date_column.is_some() && !self.bindings.is_empty() {
            LoaderState::Configured
        } else {
            LoaderState::Unconfigured
        };
        self
    }
}

fn collect_points(
    table: &Table,
    date_index: usize,
    group_index: Option<usize>,
    bindings: &[ResolvedBinding<'_>],
) -> BTreeMap<SeriesId, Vec<DatePoint>> {
    let mut accumulated: BTreeMap<SeriesId, Vec<DatePoint>> = BTreeMap::new();
    for row in table.rows() {
        let Some(date) = cell(row, date_index).filter(|token| !token.is_empty()) else {
            continue;
        };
        let key = DateKey::normalize(date);
        let row_group = group_index
            .and_then(|index| cell(row, index))
            .filter(|group| !group.is_empty());
        for binding in bindings {
            if !binding.group.matches(row_group) {
                continue;
            }
            let Some(value) = cell(row, binding.column).and_then(parse_number) else {
                continue;
            };
            accumulated
                .entry(binding.series)
                .or_default()
                .push(DatePoint::new(key.clone(), value));
        }
    }
    accumulated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::test_support::MockFetcher;
    use crate::render::Color;
    use crate::series::Series;

    const URL: &str = "https://example.test/daily.tsv";

    fn values(chart: &Chart, id: SeriesId) -> Vec<(String, f64)> {
        chart
            .get(id)
            .unwrap()
            .date_points()
            .iter()
            .map(|point| (point.key.to_string(), point.value))
            .collect()
    }

    #[tokio::test]
    async fn normalizes_and_orders_dates() {
        let fetcher = MockFetcher::with_body(URL, "日付\t売上\n2025-01-01\t100\n20250102\t200\n");
        let mut chart = Chart::new();
        let sales = chart.add_series(Series::line("売上", Color::BLACK));
        let mut loader = DateSeriesLoader::new(URL).date_column("日付").bind(sales, "売上");

        let summary = loader.load(&fetcher, &mut chart).await.unwrap();
        assert_eq!(
            values(&chart, sales),
            vec![("20250101".to_string(), 100.0), ("20250102".to_string(), 200.0)]
        );
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.points, 2);
        assert_eq!(loader.state(), LoaderState::Loaded);
        assert_eq!(fetcher.call_count(), 1);
        assert!(chart.get(sales).unwrap().date_points()[0].annotation.is_empty());
    }

    #[tokio::test]
    async fn series_is_filled_by_one_load_only() {
        let fetcher = MockFetcher::with_body(URL, "date\tv\n20250102\t2\n20250101\t1\n");
        let mut chart = Chart::new();
        let id = chart.add_series(Series::line("v", Color::BLACK));
        let mut loader = DateSeriesLoader::new(URL).date_column("date").bind(id, "v");
        assert_eq!(loader.url(), URL);
        loader.load(&fetcher, &mut chart).await.unwrap();

        assert!(matches!(
            loader.load(&fetcher, &mut chart).await,
            Err(ChartError::InvalidConfiguration(_))
        ));
        assert_eq!(loader.state(), LoaderState::Loaded);

        let mut other = DateSeriesLoader::new(URL).date_column("date").bind(id, "v");
        assert!(matches!(
            other.load(&fetcher, &mut chart).await,
            Err(ChartError::InvalidConfiguration(_))
        ));
        assert_eq!(fetcher.call_count(), 1);
        assert_eq!(
            values(&chart, id),
            vec![("20250101".to_string(), 1.0), ("20250102".to_string(), 2.0)]
        );
    }

    #[tokio::test]
    async fn sorts_rows_and_keeps_duplicates_stably() {
        let body = "date\tv\n20250103\t3\n20250101\t1\n20250103\t4\n2025-01-02\t2\n";
        let fetcher = MockFetcher::with_body(URL, body);
        let mut chart = Chart::new();
        let id = chart.add_series(Series::bar("v", Color::BLACK));
        let mut loader = DateSeriesLoader::new(URL).date_column("date").bind(id, "v");
        loader.load(&fetcher, &mut chart).await.unwrap();

        let loaded: Vec<f64> = values(&chart, id).into_iter().map(|(_, v)| v).collect();
        assert_eq!(loaded, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[tokio::test]
    async fn group_bindings_only_see_their_rows() {
        let body = "date\tregion\tsales\n20250101\tA\t10\n20250101\tB\t20\n20250102\tA\t11\n20250102\t\t99\n";
        let fetcher = MockFetcher::with_body(URL, body);
        let mut chart = Chart::new();
        let a = chart.add_series(Series::line("A", Color::BLACK));
        let b = chart.add_series(Series::line("B", Color::BLACK));
        let total = chart.add_series(Series::line("all", Color::BLACK));
        let mut loader = DateSeriesLoader::new(URL)
            .date_column("date")
            .group_column("region")
            .bind_group(a, "sales", "A")
            .bind_group(b, "sales", "B")
            .bind(total, "sales");
        let summary = loader.load(&fetcher, &mut chart).await.unwrap();

        let a_values: Vec<f64> = values(&chart, a).into_iter().map(|(_, v)| v).collect();
        let b_values: Vec<f64> = values(&chart, b).into_iter().map(|(_, v)| v).collect();
        assert_eq!(a_values, vec![10.0, 11.0]);
        assert_eq!(b_values, vec![20.0]);
        assert_eq!(chart.get(total).unwrap().len(), 4);
        assert_eq!(summary.series, vec![a, b, total]);
    }

    #[tokio::test]
    async fn bad_cells_skip_only_their_binding() {
        let body = "date\tx\ty\n20250101\t1\tn/a\n\t5\t5\n20250102\t\t2\n20250103\t3\n";
        let fetcher = MockFetcher::with_body(URL, body);
        let mut chart = Chart::new();
        let x = chart.add_series(Series::line("x", Color::BLACK));
        let y = chart.add_series(Series::line("y", Color::BLACK));
        let mut loader = DateSeriesLoader::new(URL)
            .date_column("date")
            .bind(x, "x")
            .bind(y, "y");
        loader.load(&fetcher, &mut chart).await.unwrap();

        assert_eq!(
            values(&chart, x),
            vec![("20250101".to_string(), 1.0), ("20250103".to_string(), 3.0)]
        );
        assert_eq!(values(&chart, y), vec![("20250102".to_string(), 2.0)]);
    }

    #[tokio::test]
    async fn missing_column_aborts_before_mutation() {
        let fetcher = MockFetcher::with_body(URL, "date\tsales\n20250101\t1\n");
        let mut chart = Chart::new();
        let sales = chart.add_series(Series::line("sales", Color::BLACK));
        let other = chart.add_series(Series::line("other", Color::BLACK));
        let mut loader = DateSeriesLoader::new(URL)
            .date_column("date")
            .bind(sales, "sales")
            .bind(other, "profit");

        let err = loader.load(&fetcher, &mut chart).await.unwrap_err();
        assert!(matches!(err, ChartError::MissingColumn(ref name) if name == "profit"));
        assert!(chart.get(sales).unwrap().is_empty());
        assert_eq!(loader.state(), LoaderState::Failed);
    }

    #[tokio::test]
    async fn missing_date_or_group_column_is_structural() {
        let fetcher = MockFetcher::with_body(URL, "day\tsales\n20250101\t1\n");
        let mut chart = Chart::new();
        let sales = chart.add_series(Series::line("sales", Color::BLACK));

        let mut loader = DateSeriesLoader::new(URL).date_column("date").bind(sales, "sales");
        let err = loader.load(&fetcher, &mut chart).await.unwrap_err();
        assert!(matches!(err, ChartError::MissingColumn(ref name) if name == "date"));

        let mut loader = DateSeriesLoader::new(URL)
            .date_column("day")
            .group_column("region")
            .bind(sales, "sales");
        let err = loader.load(&fetcher, &mut chart).await.unwrap_err();
        assert!(matches!(err, ChartError::MissingColumn(ref name) if name == "region"));
    }

    #[tokio::test]
    async fn fetch_and_empty_errors_surface() {
        let mut chart = Chart::new();
        let sales = chart.add_series(Series::line("sales", Color::BLACK));

        let fetcher = MockFetcher::failing(503);
        let mut loader = DateSeriesLoader::new(URL).date_column("date").bind(sales, "sales");
        let err = loader.load(&fetcher, &mut chart).await.unwrap_err();
        assert!(matches!(err, ChartError::Fetch { status: 503, .. }));

        let fetcher = MockFetcher::with_body(URL, "\n  \n");
        let err = loader.load(&fetcher, &mut chart).await.unwrap_err();
        assert!(matches!(err, ChartError::EmptyResource { .. }));
        assert!(chart.get(sales).unwrap().is_empty());
    }

    #[tokio::test]
    async fn unconfigured_loader_does_not_fetch() {
        let fetcher = MockFetcher::with_body(URL, "date\n");
        let mut chart = Chart::new();
        let mut loader = DateSeriesLoader::new(URL).date_column("date");
        assert_eq!(loader.state(), LoaderState::Unconfigured);

        let err = loader.load(&fetcher, &mut chart).await.unwrap_err();
        assert!(matches!(err, ChartError::InvalidConfiguration(_)));
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn rejects_bad_targets_before_fetch() {
        let fetcher = MockFetcher::with_body(URL, "date\tv\n20250101\t1\n");
        let mut chart = Chart::new();
        let hist = chart.add_series(Series::histogram("h", Color::BLACK));
        let line = chart.add_series(Series::line("l", Color::BLACK));

        let mut loader = DateSeriesLoader::new(URL).date_column("date").bind(hist, "v");
        assert!(matches!(
            loader.load(&fetcher, &mut chart).await,
            Err(ChartError::InvalidConfiguration(_))
        ));

        let mut loader = DateSeriesLoader::new(URL)
            .date_column("date")
            .bind_group(line, "v", "A");
        assert!(matches!(
            loader.load(&fetcher, &mut chart).await,
            Err(ChartError::InvalidConfiguration(_))
        ));

        let stray = Series::line("stray", Color::BLACK).id();
        let mut loader = DateSeriesLoader::new(URL).date_column("date").bind(stray, "v");
        assert!(matches!(
            loader.load(&fetcher, &mut chart).await,
            Err(ChartError::UnknownSeries(id)) if id == stray
        ));
        assert_eq!(fetcher.call_count(), 0);
    }
}
