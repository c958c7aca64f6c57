//! Rendering primitives handed to the external painting layer.
//!
//! These types are backend-agnostic: an SVG or canvas painter reads them and
//! decides how to emit markup. Nothing in this crate paints.

use crate::geom::ScreenPoint;

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Hex notation (`#rrggbb`) for markup emitters.
    pub fn to_hex(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

/// Series palette, assigned round-robin by creation order.
pub const SERIES_PALETTE: [Color; 8] = [
    Color::rgb8(0x41, 0x69, 0xe1),
    Color::rgb8(0xe5, 0x5a, 0x4e),
    Color::rgb8(0x3c, 0xb3, 0x71),
    Color::rgb8(0xf2, 0xa5, 0x3a),
    Color::rgb8(0x8a, 0x5c, 0xc7),
    Color::rgb8(0x2a, 0xb7, 0xca),
    Color::rgb8(0xd4, 0x5d, 0x9c),
    Color::rgb8(0x7f, 0x8c, 0x8d),
];

/// Palette color for the n-th created series.
pub fn palette_color(index: usize) -> Color {
    SERIES_PALETTE[index % SERIES_PALETTE.len()]
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.5,
        }
    }
}

/// Bar fill styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarStyle {
    /// Fill color.
    pub fill: Color,
    /// Fraction of the slot width a bar occupies.
    pub width_ratio: f32,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            fill: Color::BLACK,
            width_ratio: 0.8,
        }
    }
}

/// A single path command in viewport space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Start a new subpath.
    MoveTo(ScreenPoint),
    /// Cubic Bezier segment from the current point.
    CubicTo {
        /// First control point.
        c1: ScreenPoint,
        /// Second control point.
        c2: ScreenPoint,
        /// Segment end point.
        end: ScreenPoint,
    },
}

/// An ordered list of path commands.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a path command.
    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    /// Access all commands.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Check whether the path has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of cubic segments.
    pub fn curve_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, PathCommand::CubicTo { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_wraps_round_robin() {
        assert_eq!(palette_color(0), SERIES_PALETTE[0]);
        assert_eq!(palette_color(SERIES_PALETTE.len() + 2), SERIES_PALETTE[2]);
    }

    #[test]
    fn hex_uses_lowercase_channels() {
        assert_eq!(Color::rgb8(0x41, 0x69, 0xe1).to_hex(), "#4169e1");
        assert_eq!(Color::WHITE.to_hex(), "#ffffff");
    }

    #[test]
    fn curve_count_ignores_moves() {
        let mut path = Path::new();
        let p = ScreenPoint::new(0.0, 0.0);
        path.push(PathCommand::MoveTo(p));
        path.push(PathCommand::CubicTo { c1: p, c2: p, end: p });
        assert_eq!(path.curve_count(), 1);
        assert_eq!(path.commands().len(), 2);
    }
}
