//! tabchart loads tab-delimited data into chart series and computes the
//! geometry a renderer needs: nice axis ticks, histogram bins, and smoothed
//! frequency curves.
//!
//! Drawing is left to the embedder. Geometry comes out as plain values
//! ([`AxisScale`], [`BinSet`], [`Path`]) in data or screen space.

#![forbid(unsafe_code)]

pub mod axis;
pub mod chart;
pub mod config;
pub mod datasource;
pub mod error;
pub mod geom;
pub mod histogram;
pub mod loader;
pub mod render;
pub mod series;
pub mod smooth;
pub mod tabular;
pub mod transform;
pub mod view;

pub use axis::{AxisConfig, AxisFormatter, AxisScale, AxisSide, nice_interval};
pub use chart::{Chart, ChartBuilder, Histogram};
pub use config::{AxisFormat, ChartConfig};
pub use datasource::{AppendError, DataMode, DateKey, DatePoint, SeriesStore};
pub use error::{ChartError, ChartResult};
pub use geom::{PlotSize, Point, ScreenPoint};
pub use histogram::{BinConfig, BinSet, sturges_bin_count};
pub use loader::{
    DEFAULT_DISTRIBUTION_TITLE, DateSeriesLoader, Fetcher, GroupKey, HistogramSeriesLoader,
    LoadSummary, LoaderState, ReqwestFetcher,
};
pub use render::{BarStyle, Color, LineStyle, Path, PathCommand, SERIES_PALETTE, palette_color};
pub use series::{Series, SeriesId, SeriesKind};
pub use smooth::{DEFAULT_TENSION, smooth_path, smooth_screen_path};
pub use tabular::Table;
pub use transform::Transform;
pub use view::Range;
