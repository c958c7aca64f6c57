//! Chart series: identity, styling, and point storage.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::axis::AxisSide;
use crate::datasource::{AppendError, DataMode, DateKey, DatePoint, SeriesStore};
use crate::render::{BarStyle, Color, LineStyle};
use crate::view::Range;

static SERIES_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Stable handle for a series.
///
/// Loaders bind columns to series through this handle rather than through
/// references to the series itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesId(u64);

impl SeriesId {
    fn next() -> Self {
        Self(SERIES_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Series rendering kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesKind {
    /// Date-keyed line.
    Line(LineStyle),
    /// Date-keyed bars.
    Bar(BarStyle),
    /// Value distribution drawn as a histogram.
    Histogram(BarStyle),
}

impl SeriesKind {
    /// Storage mode this kind requires.
    pub fn data_mode(&self) -> DataMode {
        match self {
            Self::Line(_) | Self::Bar(_) => DataMode::Dated,
            Self::Histogram(_) => DataMode::Distribution,
        }
    }

    /// Primary color of the series.
    pub fn color(&self) -> Color {
        match self {
            Self::Line(style) => style.color,
            Self::Bar(style) | Self::Histogram(style) => style.fill,
        }
    }
}

/// A named, styled, ordered point collection.
///
/// Identity fields (title and kind) are fixed at construction.
#[derive(Debug, Clone)]
pub struct Series {
    id: SeriesId,
    title: String,
    kind: SeriesKind,
    axis: AxisSide,
    data: SeriesStore,
}

impl Series {
    fn new(title: impl Into<String>, kind: SeriesKind) -> Self {
        let data = match kind.data_mode() {
            DataMode::Dated => SeriesStore::dated(),
            DataMode::Distribution => SeriesStore::distribution(),
        };
        Self {
            id: SeriesId::next(),
            title: title.into(),
            kind,
            axis: AxisSide::Primary,
            data,
        }
    }

    /// Create a date-keyed line series.
    pub fn line(title: impl Into<String>, color: Color) -> Self {
        Self::new(
            title,
            SeriesKind::Line(LineStyle {
                color,
                ..LineStyle::default()
            }),
        )
    }

    /// Create a date-keyed bar series.
    pub fn bar(title: impl Into<String>, color: Color) -> Self {
        Self::new(
            title,
            SeriesKind::Bar(BarStyle {
                fill: color,
                ..BarStyle::default()
            }),
        )
    }

    /// Create a distribution series.
    pub fn histogram(title: impl Into<String>, color: Color) -> Self {
        Self::new(
            title,
            SeriesKind::Histogram(BarStyle {
                fill: color,
                width_ratio: 1.0,
            }),
        )
    }

    /// Create a series with an explicit kind.
    pub fn with_kind(title: impl Into<String>, kind: SeriesKind) -> Self {
        Self::new(title, kind)
    }

    /// Assign the series to an axis. Only meaningful for date-keyed series.
    pub fn on_axis(mut self, axis: AxisSide) -> Self {
        self.axis = axis;
        self
    }

    /// Access the series identifier.
    pub fn id(&self) -> SeriesId {
        self.id
    }

    /// Access the series title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Access the series kind.
    pub fn kind(&self) -> &SeriesKind {
        &self.kind
    }

    /// Access the axis assignment.
    pub fn axis(&self) -> AxisSide {
        self.axis
    }

    /// Storage mode of the series.
    pub fn data_mode(&self) -> DataMode {
        self.data.mode()
    }

    /// Dated points in order; empty for distributions.
    pub fn date_points(&self) -> &[DatePoint] {
        self.data.date_points()
    }

    /// Distribution values in insertion order; empty for dated series.
    pub fn values(&self) -> &[f64] {
        self.data.values()
    }

    /// Append a dated point.
    pub fn push_date_point(
        &mut self,
        key: DateKey,
        value: f64,
        annotation: impl Into<String>,
    ) -> Result<usize, AppendError> {
        self.data
            .push_date_point(DatePoint::new(key, value).with_annotation(annotation))
    }

    /// Append dated points in order.
    pub fn extend_date_points<I>(&mut self, points: I) -> Result<usize, AppendError>
    where
        I: IntoIterator<Item = DatePoint>,
    {
        self.data.extend_date_points(points)
    }

    /// Append a distribution value.
    pub fn push_value(&mut self, value: f64) -> Result<usize, AppendError> {
        self.data.push_value(value)
    }

    /// Append distribution values in order.
    pub fn extend_values<I>(&mut self, values: I) -> Result<usize, AppendError>
    where
        I: IntoIterator<Item = f64>,
    {
        self.data.extend_values(values)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Range of the series values.
    pub fn bounds(&self) -> Option<Range> {
        self.data.bounds()
    }

    /// Access the series generation.
    pub fn generation(&self) -> u64 {
        self.data.generation()
    }
}
