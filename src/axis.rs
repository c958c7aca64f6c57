//! Axis configuration, "nice" tick scales, and label formatting.

use std::sync::Arc;

use crate::view::Range;

/// Largest data range that still gets unit ticks.
const UNIT_TICK_MAX_RANGE: f64 = 30.0;
/// Approximate number of intervals for larger ranges.
const TARGET_INTERVALS: f64 = 10.0;
const PERCENT_INTERVAL: f64 = 10.0;
const PERCENT_MIN_CEILING: f64 = 100.0;

/// Which vertical axis a time series is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AxisSide {
    /// Left-hand axis.
    #[default]
    Primary,
    /// Right-hand axis.
    Secondary,
}

/// Formatter for axis tick labels.
///
/// The formatter also acts as the format hint for scale computation:
/// [`AxisFormatter::Percent`] switches the scale to fixed 10-step ticks.
#[derive(Clone, Default)]
pub enum AxisFormatter {
    /// Plain numbers.
    #[default]
    Number,
    /// Percentages; values are already in percent units.
    Percent,
    /// Custom formatter callback, scaled as plain numbers.
    Custom(Arc<dyn Fn(f64) -> String + Send + Sync>),
}

impl AxisFormatter {
    /// Whether the axis denotes a percentage.
    pub fn is_percentage(&self) -> bool {
        matches!(self, Self::Percent)
    }

    /// Format a value for display.
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Number => format_number(value),
            Self::Percent => format!("{}%", format_number(value)),
            Self::Custom(formatter) => formatter(value),
        }
    }
}

impl std::fmt::Debug for AxisFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number => write!(f, "AxisFormatter::Number"),
            Self::Percent => write!(f, "AxisFormatter::Percent"),
            Self::Custom(_) => write!(f, "AxisFormatter::Custom(..)"),
        }
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.6}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Axis configuration for one side of a chart.
#[derive(Debug, Clone, Default)]
pub struct AxisConfig {
    title: Option<String>,
    units: Option<String>,
    formatter: AxisFormatter,
}

impl AxisConfig {
    /// Create a plain numeric axis configuration.
    pub fn number() -> Self {
        Self::default()
    }

    /// Create a percentage axis configuration.
    pub fn percent() -> Self {
        Self::default().with_formatter(AxisFormatter::Percent)
    }

    /// Set the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the axis units.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// Set the axis formatter.
    pub fn with_formatter(mut self, formatter: AxisFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Access the axis title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Access the axis units.
    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    /// Access the formatter.
    pub fn formatter(&self) -> &AxisFormatter {
        &self.formatter
    }
}

/// Tick scale for a numeric axis.
///
/// Labels are strictly ascending and end at or above the data maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisScale {
    /// Highest tick (the axis ceiling).
    pub max_tick: f64,
    /// Number of labels.
    pub tick_count: usize,
    /// Distance between consecutive generated labels.
    pub interval: f64,
    /// Tick positions in ascending order.
    pub labels: Vec<f64>,
}

impl AxisScale {
    /// Scale returned when an axis has no data.
    pub fn empty() -> Self {
        Self {
            max_tick: 0.0,
            tick_count: 0,
            interval: 0.0,
            labels: Vec::new(),
        }
    }

    /// Check whether this is the no-data sentinel.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Lowest tick, or zero for the sentinel.
    pub fn min_tick(&self) -> f64 {
        self.labels.first().copied().unwrap_or(0.0)
    }

    /// Domain covered by the ticks.
    pub fn domain(&self) -> Range {
        Range::new(self.min_tick(), self.max_tick)
    }

    /// Compute a scale for the given data range.
    ///
    /// `None` (no data on this axis) yields [`AxisScale::empty`].
    pub fn compute(data: Option<Range>, percentage: bool) -> Self {
        let Some(data) = data.filter(Range::is_finite) else {
            return Self::empty();
        };
        let range_min = if percentage || data.min >= 0.0 {
            0.0
        } else {
            data.min
        };
        let (interval, ceiling) = if percentage {
            let ceiling = ((data.max / PERCENT_INTERVAL).ceil() * PERCENT_INTERVAL)
                .max(PERCENT_MIN_CEILING);
            (PERCENT_INTERVAL, ceiling)
        } else {
            let range = data.max - range_min;
            if range <= UNIT_TICK_MAX_RANGE {
                (1.0, data.max.ceil())
            } else {
                let interval = nice_interval(range / TARGET_INTERVALS);
                (interval, (data.max / interval).ceil() * interval)
            }
        };

        let labels = tick_labels(range_min, ceiling, interval, data.max);
        let scale = Self {
            max_tick: ceiling,
            tick_count: labels.len(),
            interval,
            labels,
        };
        tracing::trace!(
            min = range_min,
            max = scale.max_tick,
            interval,
            ticks = scale.tick_count,
            "computed axis scale"
        );
        scale
    }
}

/// Round an ideal interval to a 1/2/5 multiple of its power of ten.
pub fn nice_interval(ideal: f64) -> f64 {
    if !ideal.is_finite() || ideal <= 0.0 {
        return 1.0;
    }
    let magnitude = 10_f64.powf(ideal.log10().floor());
    let residual = ideal / magnitude;
    if residual > 5.0 {
        magnitude * 5.0
    } else if residual > 2.0 {
        magnitude * 2.0
    } else {
        magnitude
    }
}

/// Labels from `start` to `ceiling` in `interval` steps.
///
/// The label count is linear in `(ceiling - start) / interval`. Percentage
/// axes use a fixed step of 10, so very large percentages produce one label
/// per 10 units.
fn tick_labels(start: f64, ceiling: f64, interval: f64, data_max: f64) -> Vec<f64> {
    let tolerance = interval * 1e-9;
    let mut labels = Vec::with_capacity(((ceiling - start) / interval) as usize + 2);
    let mut index = 0_usize;
    loop {
        let value = start + interval * index as f64;
        if value > ceiling + tolerance {
            break;
        }
        labels.push(value);
        index += 1;
    }
    if let Some(&last) = labels.last()
        && last < data_max
        && ceiling > last
    {
        labels.push(ceiling);
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_ascending_and_covers(scale: &AxisScale, data_max: f64) {
        assert!(scale.labels.windows(2).all(|w| w[0] < w[1]));
        assert!(*scale.labels.last().unwrap() >= data_max);
        assert_eq!(scale.tick_count, scale.labels.len());
    }

    #[test]
    fn no_data_yields_sentinel() {
        let scale = AxisScale::compute(None, false);
        assert_eq!(scale, AxisScale::empty());
        assert_eq!(scale.max_tick, 0.0);
        assert_eq!(scale.tick_count, 0);
    }

    #[test]
    fn small_ranges_use_unit_ticks() {
        let scale = AxisScale::compute(Some(Range::new(3.0, 12.4)), false);
        assert_eq!(scale.interval, 1.0);
        assert_eq!(scale.max_tick, 13.0);
        assert_eq!(scale.labels.first(), Some(&0.0));
        assert_eq!(scale.tick_count, 14);
        assert_ascending_and_covers(&scale, 12.4);
    }

    #[test]
    fn large_ranges_use_nice_multipliers() {
        let scale = AxisScale::compute(Some(Range::new(10.0, 87.0)), false);
        assert_eq!(scale.interval, 5.0);
        assert_eq!(scale.max_tick, 90.0);
        assert_ascending_and_covers(&scale, 87.0);

        let scale = AxisScale::compute(Some(Range::new(0.0, 340.0)), false);
        assert_eq!(scale.interval, 20.0);
        assert_eq!(scale.max_tick, 340.0);

        let scale = AxisScale::compute(Some(Range::new(0.0, 640.0)), false);
        assert_eq!(scale.interval, 50.0);
        assert_eq!(scale.max_tick, 650.0);

        let scale = AxisScale::compute(Some(Range::new(0.0, 1234.0)), false);
        assert_eq!(scale.interval, 100.0);
        assert_eq!(scale.max_tick, 1300.0);
        assert_ascending_and_covers(&scale, 1234.0);
    }

    #[test]
    fn negative_data_starts_at_minimum() {
        let scale = AxisScale::compute(Some(Range::new(-37.0, 55.0)), false);
        assert_eq!(scale.labels[0], -37.0);
        assert_eq!(scale.interval, 5.0);
        // -37 + 18 * 5 = 53 < 55, so the ceiling is appended explicitly.
        assert_eq!(scale.labels.last(), Some(&55.0));
        assert_ascending_and_covers(&scale, 55.0);
    }

    #[test]
    fn percentage_axis_has_floor_of_one_hundred() {
        let scale = AxisScale::compute(Some(Range::new(5.0, 42.0)), true);
        assert_eq!(scale.interval, 10.0);
        assert_eq!(scale.max_tick, 100.0);
        assert_eq!(scale.labels.first(), Some(&0.0));
        assert!(scale.labels.iter().all(|v| v % 10.0 == 0.0));

        let scale = AxisScale::compute(Some(Range::new(-20.0, 123.0)), true);
        assert_eq!(scale.labels.first(), Some(&0.0));
        assert_eq!(scale.max_tick, 130.0);
        assert_ascending_and_covers(&scale, 123.0);
    }

    #[test]
    fn large_percentages_keep_fixed_step() {
        let scale = AxisScale::compute(Some(Range::new(0.0, 1e6)), true);
        assert_eq!(scale.tick_count, 100_001);
        assert_eq!(scale.max_tick, 1e6);
        assert_eq!(scale.labels.last(), Some(&1e6));
    }

    #[test]
    fn all_zero_data_has_single_tick() {
        let scale = AxisScale::compute(Some(Range::point(0.0)), false);
        assert_eq!(scale.labels, vec![0.0]);
        assert_eq!(scale.max_tick, 0.0);
    }

    #[test]
    fn ticks_cover_data_across_ranges() {
        let ranges = [
            (0.0, 0.5),
            (0.0, 29.9),
            (0.0, 31.0),
            (-5.0, -1.0),
            (-1000.0, 2.0),
            (12.0, 99_999.0),
            (0.001, 70_000.0),
        ];
        for (min, max) in ranges {
            for percentage in [false, true] {
                let scale = AxisScale::compute(Some(Range::new(min, max)), percentage);
                assert_ascending_and_covers(&scale, max);
            }
        }
    }

    #[test]
    fn nice_interval_snaps_to_multipliers() {
        assert_eq!(nice_interval(3.4), 2.0);
        assert_eq!(nice_interval(7.7), 5.0);
        assert_eq!(nice_interval(12.3), 10.0);
        assert_eq!(nice_interval(0.0), 1.0);
    }

    #[test]
    fn formatter_renders_labels() {
        assert_eq!(AxisFormatter::Number.format(40.0), "40");
        assert_eq!(AxisFormatter::Number.format(2.5), "2.5");
        assert_eq!(AxisFormatter::Percent.format(30.0), "30%");
        let custom = AxisFormatter::Custom(Arc::new(|v| format!("${v:.2}")));
        assert_eq!(custom.format(1.0), "$1.00");
        assert!(!custom.is_percentage());
        assert!(AxisConfig::percent().formatter().is_percentage());
    }

    #[test]
    fn config_keeps_title_and_units() {
        let config = AxisConfig::number().with_title("Revenue").with_units("JPY");
        assert_eq!(config.title(), Some("Revenue"));
        assert_eq!(config.units(), Some("JPY"));
        assert!(AxisConfig::percent().units().is_none());
    }
}
