//! Coordinate transforms between data and viewport space.

use crate::geom::{PlotSize, Point, ScreenPoint};
use crate::view::Range;

const MIN_SPAN: f64 = 1e-12;

/// Linear transform from data coordinates into viewport coordinates.
///
/// X maps `[x_domain.min, x_domain.max]` onto `[0, width]`. Y maps
/// `[y_domain.min, y_domain.max]` onto `[height, 0]`, because plot space
/// grows downward.
#[derive(Debug, Clone)]
pub struct Transform {
    x_domain: Range,
    y_domain: Range,
    size: PlotSize,
}

impl Transform {
    /// Create a transform for the given domains and plot size.
    ///
    /// Returns `None` when the plot has no area or a domain is not finite.
    pub fn new(x_domain: Range, y_domain: Range, size: PlotSize) -> Option<Self> {
        if !size.is_valid() || !x_domain.is_finite() || !y_domain.is_finite() {
            return None;
        }
        Some(Self {
            x_domain: x_domain.with_min_span(MIN_SPAN),
            y_domain: y_domain.with_min_span(MIN_SPAN),
            size,
        })
    }

    /// Transform used for frequency curves: Y runs from zero to `max_frequency`.
    pub fn for_frequencies(x_domain: Range, max_frequency: f64, size: PlotSize) -> Option<Self> {
        let y_domain = Range::new(0.0, max_frequency.max(0.0));
        let transform = Self::new(x_domain, y_domain, size)?;
        // A flat zero curve sits on the baseline rather than mid-plot.
        if y_domain.span() <= 0.0 {
            return Some(Self {
                y_domain: Range::new(0.0, MIN_SPAN),
                ..transform
            });
        }
        Some(transform)
    }

    /// Access the plot size.
    pub fn size(&self) -> PlotSize {
        self.size
    }

    /// Map a data point into viewport space.
    pub fn data_to_screen(&self, point: Point) -> Option<ScreenPoint> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return None;
        }
        let x_norm = (point.x - self.x_domain.min) / self.x_domain.span();
        let y_norm = (point.y - self.y_domain.min) / self.y_domain.span();
        let sx = x_norm * self.size.width;
        let sy = self.size.height - y_norm * self.size.height;
        Some(ScreenPoint::new(sx, sy))
    }

    /// Map a viewport point back into data space.
    pub fn screen_to_data(&self, point: ScreenPoint) -> Point {
        let x_norm = point.x / self.size.width;
        let y_norm = (self.size.height - point.y) / self.size.height;
        Point::new(
            self.x_domain.min + x_norm * self.x_domain.span(),
            self.y_domain.min + y_norm * self.y_domain.span(),
        )
    }
}
