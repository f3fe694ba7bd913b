//! Grid line descriptors and the viewport they span
//!
//! A line is an immutable value: its axis, its index along the perpendicular
//! axis, and the resulting fixed coordinate. The path a line draws is produced
//! separately by [`super::distort`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Drawing surface extent in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport, clamping negative or non-finite extents to zero
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: clamp_extent(width),
            height: clamp_extent(height),
        }
    }

    /// True when either extent is zero (nothing can be drawn)
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Extent covered by the fixed coordinates of lines on `axis`
    #[inline]
    pub fn span(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.width,
            Axis::Horizontal => self.height,
        }
    }

    /// Extent a line on `axis` runs across
    #[inline]
    pub fn run(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.height,
            Axis::Horizontal => self.width,
        }
    }
}

#[inline]
fn clamp_extent(v: f32) -> f32 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// Orientation of a grid line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Fixed `y`, runs along `x`
    Horizontal,
    /// Fixed `x`, runs along `y`
    Vertical,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Vertical, Axis::Horizontal];

    /// Build a point from (fixed, along) coordinates on this axis
    #[inline]
    pub fn compose(self, fixed: f32, along: f32) -> Vec2 {
        match self {
            Axis::Vertical => Vec2::new(fixed, along),
            Axis::Horizontal => Vec2::new(along, fixed),
        }
    }

    /// Split a point into (fixed, along) coordinates on this axis
    #[inline]
    pub fn split(self, point: Vec2) -> (f32, f32) {
        match self {
            Axis::Vertical => (point.x, point.y),
            Axis::Horizontal => (point.y, point.x),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        }
    }
}

/// One line of the grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub axis: Axis,
    /// Position in the line's axis sequence (0, 1, 2, …)
    pub index: u32,
    /// Fixed coordinate, always `index * gap`
    pub position: f32,
    /// Extent the line runs across
    pub length: f32,
}

impl GridLine {
    pub fn new(axis: Axis, index: u32, gap: f32, viewport: &Viewport) -> Self {
        Self {
            axis,
            index,
            position: index as f32 * gap,
            length: viewport.run(axis),
        }
    }

    /// Endpoint at the start of the run
    #[inline]
    pub fn start(&self) -> Vec2 {
        self.axis.compose(self.position, 0.0)
    }

    /// Endpoint at the end of the run
    #[inline]
    pub fn end(&self) -> Vec2 {
        self.axis.compose(self.position, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_clamps_degenerate_extents() {
        let vp = Viewport::new(-10.0, f32::NAN);
        assert_eq!(vp.width, 0.0);
        assert_eq!(vp.height, 0.0);
        assert!(vp.is_empty());
        assert!(!Viewport::new(1.0, 1.0).is_empty());
    }

    #[test]
    fn test_axis_compose_split_swap() {
        let p = Axis::Horizontal.compose(5.0, 7.0);
        assert_eq!(p, Vec2::new(7.0, 5.0));
        assert_eq!(Axis::Horizontal.split(p), (5.0, 7.0));
        assert_eq!(Axis::Vertical.split(p), (7.0, 5.0));
    }

    #[test]
    fn test_line_endpoints() {
        let vp = Viewport::new(200.0, 100.0);
        let v = GridLine::new(Axis::Vertical, 3, 20.0, &vp);
        assert_eq!(v.start(), Vec2::new(60.0, 0.0));
        assert_eq!(v.end(), Vec2::new(60.0, 100.0));

        let h = GridLine::new(Axis::Horizontal, 2, 20.0, &vp);
        assert_eq!(h.start(), Vec2::new(0.0, 40.0));
        assert_eq!(h.end(), Vec2::new(200.0, 40.0));
    }
}
