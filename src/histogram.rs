//! Histogram binning and frequency counting.
//!
//! Bins are half-open `[lo, hi)` except the last, which is closed on both
//! ends. Samples outside the boundary range are dropped.

use serde::Deserialize;

use crate::axis::AxisScale;
use crate::error::{ChartError, ChartResult};
use crate::view::Range;

/// Auto-binning bounds used when there are no samples to apply Sturges' rule to.
const EMPTY_MIN_BINS: usize = 10;
const EMPTY_MAX_BINS: usize = 20;
/// Upper limit on generated bins; narrower widths are rejected.
const MAX_BINS: usize = 10_000;

/// How a value range is split into bins.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum BinConfig {
    /// Sturges' rule over a "nice" axis domain.
    #[default]
    Auto,
    /// Fixed bin width stepped from the range minimum.
    Width {
        /// Width of each bin.
        width: f64,
    },
    /// Fixed number of equal bins.
    Count {
        /// Number of bins.
        count: usize,
    },
}

impl BinConfig {
    fn validate(self) -> ChartResult<Self> {
        match self {
            Self::Width { width } if !(width.is_finite() && width > 0.0) => Err(
                ChartError::InvalidConfiguration(format!("bin width must be positive, got {width}")),
            ),
            Self::Count { count: 0 } => Err(ChartError::InvalidConfiguration(
                "bin count must be at least 1".to_string(),
            )),
            Self::Count { count } if count > MAX_BINS => Err(ChartError::InvalidConfiguration(
                format!("bin count {count} exceeds {MAX_BINS}"),
            )),
            other => Ok(other),
        }
    }
}

/// Bin boundaries over a value domain.
#[derive(Debug, Clone, PartialEq)]
pub struct BinSet {
    /// Number of bins.
    pub count: usize,
    /// Nominal bin width.
    pub width: f64,
    /// `count + 1` non-decreasing boundaries.
    pub boundaries: Vec<f64>,
    /// Tick scale over the boundary domain.
    pub axis_scale: AxisScale,
}

impl BinSet {
    /// Bin set returned when there is no range to bin.
    pub fn empty() -> Self {
        Self {
            count: 0,
            width: 0.0,
            boundaries: Vec::new(),
            axis_scale: AxisScale::empty(),
        }
    }

    /// Check whether this is the no-data sentinel.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Partition `range` into bins.
    ///
    /// `total_samples` is the sample count across every distribution being
    /// binned; automatic binning uses it for Sturges' rule. A `None` range
    /// yields [`BinSet::empty`] once the configuration has been validated.
    pub fn compute(
        range: Option<Range>,
        config: BinConfig,
        total_samples: usize,
    ) -> ChartResult<Self> {
        let config = config.validate()?;
        let Some(range) = range.filter(Range::is_finite) else {
            return Ok(Self::empty());
        };

        let bins = match config {
            BinConfig::Width { width } => {
                let count = ((range.span() / width).ceil() as usize).max(1);
                if count > MAX_BINS {
                    return Err(ChartError::InvalidConfiguration(format!(
                        "bin width {width} yields more than {MAX_BINS} bins"
                    )));
                }
                let mut boundaries: Vec<f64> = (0..count)
                    .map(|i| (range.min + width * i as f64).min(range.max))
                    .collect();
                boundaries.push(range.max);
                let axis_scale = AxisScale::compute(Some(range), false);
                Self {
                    count,
                    width,
                    boundaries,
                    axis_scale,
                }
            }
            BinConfig::Count { count } => {
                let width = range.span() / count as f64;
                let axis_scale = AxisScale::compute(Some(range), false);
                Self {
                    count,
                    width,
                    boundaries: even_boundaries(range, count),
                    axis_scale,
                }
            }
            BinConfig::Auto => {
                let axis_scale = AxisScale::compute(Some(range), false);
                let domain = axis_scale.domain();
                let count = if total_samples == 0 {
                    let ticks = (domain.span() / axis_scale.interval).floor();
                    (ticks as usize).clamp(EMPTY_MIN_BINS, EMPTY_MAX_BINS)
                } else {
                    sturges_bin_count(total_samples)
                };
                Self {
                    count,
                    width: domain.span() / count as f64,
                    boundaries: even_boundaries(domain, count),
                    axis_scale,
                }
            }
        };
        tracing::trace!(
            count = bins.count,
            width = bins.width,
            samples = total_samples,
            "computed histogram bins"
        );
        Ok(bins)
    }

    /// Boundary domain, or `None` for the sentinel.
    pub fn domain(&self) -> Option<Range> {
        let first = *self.boundaries.first()?;
        let last = *self.boundaries.last()?;
        Some(Range::new(first, last))
    }

    /// Index of the bin containing `value`, if any.
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        let domain = self.domain()?;
        if !value.is_finite() || !domain.contains(value) || self.count == 0 {
            return None;
        }
        if value == domain.max {
            return Some(self.count - 1);
        }
        let upper = self.boundaries.partition_point(|&b| b <= value);
        Some(upper.saturating_sub(1).min(self.count - 1))
    }

    /// Count samples per bin; out-of-range samples are dropped.
    pub fn frequencies(&self, values: &[f64]) -> Vec<usize> {
        let mut counts = vec![0; self.count];
        for index in values.iter().filter_map(|&value| self.bin_index(value)) {
            counts[index] += 1;
        }
        counts
    }

    /// Midpoint of each bin.
    pub fn centers(&self) -> Vec<f64> {
        self.boundaries
            .windows(2)
            .map(|pair| (pair[0] + pair[1]) * 0.5)
            .collect()
    }
}

/// Sturges' rule: `ceil(log2(n) + 1)` bins for `n` samples.
pub fn sturges_bin_count(samples: usize) -> usize {
    if samples == 0 {
        return 1;
    }
    ((samples as f64).log2() + 1.0).ceil() as usize
}

fn even_boundaries(range: Range, count: usize) -> Vec<f64> {
    let step = range.span() / count as f64;
    let mut boundaries: Vec<f64> = (0..count).map(|i| range.min + step * i as f64).collect();
    boundaries.push(range.max);
    boundaries
}
