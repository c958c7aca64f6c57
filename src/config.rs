//! Declarative chart configuration.
//!
//! Embedding pages describe a chart as JSON; every field is optional.
//!
//! ```json
//! {
//!   "title": "Daily sales",
//!   "primary_format": "percent",
//!   "bins": { "mode": "width", "width": 5 },
//!   "histogram_domain": [0, 100],
//!   "width": 800,
//!   "height": 300
//! }
//! ```

use serde::Deserialize;

use crate::axis::AxisConfig;
use crate::error::ChartResult;
use crate::geom::PlotSize;
use crate::histogram::BinConfig;
use crate::smooth::DEFAULT_TENSION;
use crate::view::Range;

/// Format hint for an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisFormat {
    /// Plain numbers.
    #[default]
    Number,
    /// Percentages.
    Percent,
}

impl AxisFormat {
    /// Axis configuration for this format.
    pub fn axis_config(self) -> AxisConfig {
        match self {
            Self::Number => AxisConfig::number(),
            Self::Percent => AxisConfig::percent(),
        }
    }
}

/// Chart configuration loaded from JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    /// Chart title; also names the series a histogram loader creates.
    pub title: Option<String>,
    /// Format of the primary (left) axis.
    pub primary_format: AxisFormat,
    /// Format of the secondary (right) axis.
    pub secondary_format: AxisFormat,
    /// Histogram binning.
    pub bins: BinConfig,
    /// Fixed histogram domain `[min, max]` used instead of the data range.
    pub histogram_domain: Option<[f64; 2]>,
    /// Curve smoothing tension.
    pub tension: f64,
    /// Plot width in pixels.
    pub width: f64,
    /// Plot height in pixels.
    pub height: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let size = PlotSize::default();
        Self {
            title: None,
            primary_format: AxisFormat::Number,
            secondary_format: AxisFormat::Number,
            bins: BinConfig::Auto,
            histogram_domain: None,
            tension: DEFAULT_TENSION,
            width: size.width,
            height: size.height,
        }
    }
}

impl ChartConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(text: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Plot size in pixels.
    pub fn plot_size(&self) -> PlotSize {
        PlotSize::new(self.width, self.height)
    }

    /// Histogram domain as a range.
    pub fn histogram_range(&self) -> Option<Range> {
        self.histogram_domain.map(|[min, max]| Range::new(min, max))
    }
}
