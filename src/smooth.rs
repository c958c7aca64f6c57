//! Curve smoothing through Catmull-Rom derived cubic Bezier segments.

use crate::geom::{Point, ScreenPoint};
use crate::render::{Path, PathCommand};
use crate::transform::Transform;

/// Default smoothing tension.
pub const DEFAULT_TENSION: f64 = 0.3;

/// Build a smoothed path through `points`.
///
/// Points are mapped into viewport space first; points that cannot be mapped
/// (non-finite coordinates) are skipped. For each consecutive pair `p1, p2`
/// with neighbours `p0, p3` (clamped at the ends), the control points are
/// `p1 + t·(p2 − p0)` and `p2 − t·(p3 − p1)`.
pub fn smooth_path(points: &[Point], transform: &Transform, tension: f64) -> Path {
    let screen: Vec<ScreenPoint> = points
        .iter()
        .filter_map(|point| transform.data_to_screen(*point))
        .collect();
    smooth_screen_path(&screen, tension)
}

/// Build a smoothed path through points already in viewport space.
pub fn smooth_screen_path(points: &[ScreenPoint], tension: f64) -> Path {
    let mut path = Path::new();
    let Some(&first) = points.first() else {
        return path;
    };
    path.push(PathCommand::MoveTo(first));

    let last = points.len() - 1;
    for i in 0..last {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(last)];
        path.push(PathCommand::CubicTo {
            c1: p1 + (p2 - p0) * tension,
            c2: p2 - (p3 - p1) * tension,
            end: p2,
        });
    }
    path
}
