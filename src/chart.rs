//! Chart container and builder.
//!
//! A chart owns its series and the configuration the geometry engines need:
//! axis formats, histogram binning, plot size, and curve tension.

use crate::axis::{AxisConfig, AxisScale, AxisSide};
use crate::config::ChartConfig;
use crate::datasource::DataMode;
use crate::error::{ChartError, ChartResult};
use crate::geom::{PlotSize, Point};
use crate::histogram::{BinConfig, BinSet};
use crate::render::{Color, Path, palette_color};
use crate::series::{Series, SeriesId};
use crate::smooth::{DEFAULT_TENSION, smooth_path};
use crate::transform::Transform;
use crate::view::Range;

/// Bins plus per-series frequencies for every distribution series.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Shared bins.
    pub bins: BinSet,
    /// Frequencies per distribution series, in chart order.
    pub frequencies: Vec<(SeriesId, Vec<usize>)>,
}

impl Histogram {
    /// Frequencies for one series.
    pub fn frequencies_of(&self, id: SeriesId) -> Option<&[usize]> {
        self.frequencies
            .iter()
            .find(|(series_id, _)| *series_id == id)
            .map(|(_, counts)| counts.as_slice())
    }

    /// Highest frequency across all series.
    pub fn max_frequency(&self) -> usize {
        self.frequencies
            .iter()
            .flat_map(|(_, counts)| counts.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

/// A chart: owned series plus geometry configuration.
#[derive(Debug, Clone)]
pub struct Chart {
    title: Option<String>,
    primary_axis: AxisConfig,
    secondary_axis: AxisConfig,
    bins: BinConfig,
    histogram_domain: Option<Range>,
    tension: f64,
    size: PlotSize,
    series: Vec<Series>,
}

impl Chart {
    /// Create a chart with default configuration.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start building a chart with custom configuration.
    pub fn builder() -> ChartBuilder {
        ChartBuilder::default()
    }

    /// Create a chart from a declarative configuration.
    pub fn from_config(config: &ChartConfig) -> Self {
        let mut builder = Self::builder()
            .primary_axis(config.primary_format.axis_config())
            .secondary_axis(config.secondary_format.axis_config())
            .bins(config.bins)
            .tension(config.tension)
            .size(config.plot_size());
        if let Some(title) = &config.title {
            builder = builder.title(title.clone());
        }
        if let Some(domain) = config.histogram_range() {
            builder = builder.histogram_domain(domain);
        }
        builder.build()
    }

    /// Access the chart title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Access an axis configuration.
    pub fn axis(&self, side: AxisSide) -> &AxisConfig {
        match side {
            AxisSide::Primary => &self.primary_axis,
            AxisSide::Secondary => &self.secondary_axis,
        }
    }

    /// Access the histogram binning configuration.
    pub fn bin_config(&self) -> BinConfig {
        self.bins
    }

    /// Access the plot size.
    pub fn size(&self) -> PlotSize {
        self.size
    }

    /// Access all series.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Add a series to the chart and return its handle.
    pub fn add_series(&mut self, series: Series) -> SeriesId {
        let id = series.id();
        self.series.push(series);
        id
    }

    /// Look up a series by handle.
    pub fn get(&self, id: SeriesId) -> Option<&Series> {
        self.series.iter().find(|series| series.id() == id)
    }

    /// Look up a series mutably by handle.
    pub fn get_mut(&mut self, id: SeriesId) -> Option<&mut Series> {
        self.series.iter_mut().find(|series| series.id() == id)
    }

    /// Palette color for the next series added to this chart.
    pub fn next_color(&self) -> Color {
        palette_color(self.series.len())
    }

    /// Distribution series in chart order.
    pub fn distributions(&self) -> impl Iterator<Item = &Series> {
        self.series
            .iter()
            .filter(|series| series.data_mode() == DataMode::Distribution)
    }

    /// Tick scale for one axis over every date-keyed series assigned to it.
    pub fn axis_scale(&self, side: AxisSide) -> AxisScale {
        let range = Range::union_all(
            self.series
                .iter()
                .filter(|series| series.data_mode() == DataMode::Dated && series.axis() == side)
                .filter_map(Series::bounds),
        );
        AxisScale::compute(range, self.axis(side).formatter().is_percentage())
    }

    /// Bin every distribution series over a shared domain.
    ///
    /// The domain is the configured histogram domain, or else the union of
    /// the distributions' value ranges.
    pub fn histogram(&self) -> ChartResult<Histogram> {
        let total_samples = self.distributions().map(Series::len).sum();
        let range = self
            .histogram_domain
            .or_else(|| Range::union_all(self.distributions().filter_map(Series::bounds)));
        let bins = BinSet::compute(range, self.bins, total_samples)?;
        let frequencies = self
            .distributions()
            .map(|series| (series.id(), bins.frequencies(series.values())))
            .collect();
        Ok(Histogram { bins, frequencies })
    }

    /// Smoothed frequency curve for one distribution series.
    ///
    /// The curve passes through `(bin center, frequency)` points, mapped onto
    /// the chart's plot area with Y scaled to the series' highest frequency.
    pub fn histogram_curve(&self, id: SeriesId) -> ChartResult<Path> {
        let series = self.get(id).ok_or(ChartError::UnknownSeries(id))?;
        if series.data_mode() != DataMode::Distribution {
            return Err(ChartError::InvalidConfiguration(format!(
                "series '{}' is not a distribution",
                series.title()
            )));
        }
        let histogram = self.histogram()?;
        let Some(domain) = histogram.bins.domain() else {
            return Ok(Path::new());
        };
        let counts = histogram.frequencies_of(id).unwrap_or_default();
        let max_frequency = counts.iter().copied().max().unwrap_or(0);
        let transform = Transform::for_frequencies(domain, max_frequency as f64, self.size)
            .ok_or_else(|| {
                ChartError::InvalidConfiguration(format!(
                    "plot size {}x{} has no area",
                    self.size.width, self.size.height
                ))
            })?;
        let points: Vec<Point> = histogram
            .bins
            .centers()
            .into_iter()
            .zip(counts)
            .map(|(center, &count)| Point::new(center, count as f64))
            .collect();
        Ok(smooth_path(&points, &transform, self.tension))
    }
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring a chart before construction.
#[derive(Debug)]
pub struct ChartBuilder {
    title: Option<String>,
    primary_axis: AxisConfig,
    secondary_axis: AxisConfig,
    bins: BinConfig,
    histogram_domain: Option<Range>,
    tension: f64,
    size: PlotSize,
    series: Vec<Series>,
}

impl Default for ChartBuilder {
    fn default() -> Self {
        Self {
            title: None,
            primary_axis: AxisConfig::default(),
            secondary_axis: AxisConfig::default(),
            bins: BinConfig::default(),
            histogram_domain: None,
            tension: DEFAULT_TENSION,
            size: PlotSize::default(),
            series: Vec::new(),
        }
    }
}

impl ChartBuilder {
    /// Set the chart title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the primary axis configuration.
    pub fn primary_axis(mut self, axis: AxisConfig) -> Self {
        self.primary_axis = axis;
        self
    }

    /// Set the secondary axis configuration.
    pub fn secondary_axis(mut self, axis: AxisConfig) -> Self {
        self.secondary_axis = axis;
        self
    }

    /// Set the histogram binning.
    pub fn bins(mut self, bins: BinConfig) -> Self {
        self.bins = bins;
        self
    }

    /// Fix the histogram domain instead of deriving it from data.
    pub fn histogram_domain(mut self, domain: Range) -> Self {
        self.histogram_domain = Some(domain);
        self
    }

    /// Set the curve smoothing tension.
    pub fn tension(mut self, tension: f64) -> Self {
        self.tension = tension;
        self
    }

    /// Set the plot size.
    pub fn size(mut self, size: PlotSize) -> Self {
        self.size = size;
        self
    }

    /// Add a series to the chart.
    pub fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Build the chart.
    pub fn build(self) -> Chart {
        Chart {
            title: self.title,
            primary_axis: self.primary_axis,
            secondary_axis: self.secondary_axis,
            bins: self.bins,
            histogram_domain: self.histogram_domain,
            tension: self.tension,
            size: self.size,
            series: self.series,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::DateKey;
    use crate::render::PathCommand;

    fn dated(title: &str, side: AxisSide, values: &[f64]) -> Series {
        let mut series = Series::line(title, Color::BLACK).on_axis(side);
        for (day, value) in values.iter().enumerate() {
            let key = DateKey::normalize(&format!("202501{:02}", day + 1));
            series.push_date_point(key, *value, "").unwrap();
        }
        series
    }

    #[test]
    fn axis_scale_uses_only_assigned_series() {
        let mut chart = Chart::builder()
            .secondary_axis(AxisConfig::percent())
            .build();
        chart.add_series(dated("left", AxisSide::Primary, &[5.0, 240.0]));
        chart.add_series(dated("right", AxisSide::Secondary, &[12.0, 48.0]));

        let primary = chart.axis_scale(AxisSide::Primary);
        assert_eq!(primary.max_tick, 240.0);
        assert_eq!(primary.interval, 20.0);
        let secondary = chart.axis_scale(AxisSide::Secondary);
        assert_eq!(secondary.max_tick, 100.0);
        assert_eq!(secondary.interval, 10.0);
    }

    #[test]
    fn axis_without_series_is_empty() {
        let mut chart = Chart::new();
        chart.add_series(Series::line("empty", Color::BLACK));
        assert!(chart.axis_scale(AxisSide::Primary).is_empty());
        assert!(chart.axis_scale(AxisSide::Secondary).is_empty());
    }

    #[test]
    fn histogram_bins_all_distributions_together() {
        let mut chart = Chart::builder().bins(BinConfig::Count { count: 2 }).build();
        let mut a = Series::histogram("a", Color::BLACK);
        a.extend_values([0.0, 1.0, 9.0]).unwrap();
        let mut b = Series::histogram("b", Color::BLACK);
        b.extend_values([10.0]).unwrap();
        let a = chart.add_series(a);
        let b = chart.add_series(b);

        let histogram = chart.histogram().unwrap();
        assert_eq!(histogram.bins.boundaries, vec![0.0, 5.0, 10.0]);
        assert_eq!(histogram.frequencies_of(a), Some(&[2, 1][..]));
        assert_eq!(histogram.frequencies_of(b), Some(&[0, 1][..]));
        assert_eq!(histogram.max_frequency(), 2);
    }

    #[test]
    fn domain_override_without_samples_uses_clamp_rule() {
        let mut chart = Chart::builder()
            .histogram_domain(Range::new(0.0, 150.0))
            .build();
        chart.add_series(Series::histogram("empty", Color::BLACK));
        let histogram = chart.histogram().unwrap();
        assert_eq!(histogram.bins.count, 15);
    }

    #[test]
    fn invalid_bins_surface_as_error() {
        let chart = Chart::builder().bins(BinConfig::Width { width: 0.0 }).build();
        assert!(matches!(
            chart.histogram(),
            Err(ChartError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn histogram_curve_spans_plot() {
        let mut chart = Chart::builder()
            .bins(BinConfig::Count { count: 4 })
            .size(PlotSize::new(400.0, 200.0))
            .build();
        let mut series = Series::histogram("h", Color::BLACK);
        series.extend_values([0.0, 1.0, 1.5, 2.5, 3.0, 4.0]).unwrap();
        let id = chart.add_series(series);

        let path = chart.histogram_curve(id).unwrap();
        assert_eq!(path.curve_count(), 3);
        // First center is 0.5 of 4 → x = 50px; its frequency (1) is below the max (2).
        let PathCommand::MoveTo(start) = path.commands()[0] else {
            panic!("expected move");
        };
        assert_eq!(start.x, 50.0);
        assert_eq!(start.y, 100.0);
    }

    #[test]
    fn histogram_curve_rejects_dated_series() {
        let mut chart = Chart::new();
        let id = chart.add_series(dated("d", AxisSide::Primary, &[1.0]));
        assert!(chart.histogram_curve(id).is_err());
    }

    #[test]
    fn from_config_applies_settings() {
        let config = ChartConfig::from_json(
            r#"{"title": "Scores", "primary_format": "percent", "bins": {"mode": "width", "width": 5}}"#,
        )
        .unwrap();
        let chart = Chart::from_config(&config);
        assert_eq!(chart.title(), Some("Scores"));
        assert!(chart.axis(AxisSide::Primary).formatter().is_percentage());
        assert_eq!(chart.bin_config(), BinConfig::Width { width: 5.0 });
    }
}
