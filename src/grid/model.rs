//! Grid model: the line set covering the current viewport

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LINES_PER_AXIS;

use super::line::{Axis, GridLine, Viewport};

/// Number of `gap`-spaced lines needed to cover `extent`, starting at 0
///
/// Capped at `MAX_LINES_PER_AXIS`.
pub fn line_count(extent: f32, gap: f32) -> u32 {
    if gap <= 0.0 || !gap.is_finite() || extent <= 0.0 || !extent.is_finite() {
        return 0;
    }
    let count = (extent / gap).ceil();
    if count > MAX_LINES_PER_AXIS as f32 {
        log::warn!(
            "{} lines needed to cover {}px at gap {}, capping at {}",
            count,
            extent,
            gap,
            MAX_LINES_PER_AXIS
        );
        return MAX_LINES_PER_AXIS;
    }
    count as u32
}

/// All horizontal and vertical lines for one viewport
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridModel {
    gap: f32,
    viewport: Viewport,
    lines: Vec<GridLine>,
}

impl GridModel {
    pub fn new(gap: f32) -> Self {
        Self {
            gap,
            viewport: Viewport::default(),
            lines: Vec::new(),
        }
    }

    /// Discard every line and regenerate the set for `viewport`
    pub fn rebuild(&mut self, viewport: Viewport) {
        self.lines.clear();
        self.viewport = viewport;

        for axis in Axis::ALL {
            let extent = viewport.span(axis);
            let count = line_count(extent, self.gap);
            self.lines.extend(
                (0..count)
                    .map(|i| GridLine::new(axis, i, self.gap, &viewport))
                    // Guards the last line against float drift in `ceil`
                    .take_while(|line| line.position < extent),
            );
        }
    }

    /// Remove all lines and forget the viewport
    pub fn clear(&mut self) {
        self.lines.clear();
        self.viewport = Viewport::default();
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn lines(&self) -> &[GridLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines of one orientation, in index order
    pub fn lines_on(&self, axis: Axis) -> impl Iterator<Item = &GridLine> {
        self.lines.iter().filter(move |line| line.axis == axis)
    }

    pub fn count_on(&self, axis: Axis) -> usize {
        self.lines_on(axis).count()
    }
}

/// Index range of lines a pointer can reach on one axis
///
/// Both bounds are exclusive: a line whose index equals `start` or `end` is
/// outside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AffectedWindow {
    pub start: i64,
    pub end: i64,
}

impl AffectedWindow {
    /// Window around `pointer_coord`, the pointer's coordinate on the same axis
    /// as the lines' fixed positions
    pub fn around(pointer_coord: f32, mass: f32, gap: f32) -> Self {
        if gap <= 0.0 || !gap.is_finite() {
            return Self { start: 0, end: 0 };
        }
        let at = pointer_coord / gap;
        let reach = mass / gap;
        Self {
            start: (at - reach).floor() as i64,
            end: (at + reach).ceil() as i64 + 1,
        }
    }

    #[inline]
    pub fn contains(&self, index: u32) -> bool {
        let index = i64::from(index);
        index > self.start && index < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rebuild_counts_per_axis() {
        let mut model = GridModel::new(20.0);
        model.rebuild(Viewport::new(200.0, 100.0));
        assert_eq!(model.count_on(Axis::Vertical), 10);
        assert_eq!(model.count_on(Axis::Horizontal), 5);

        // Partial trailing cell still gets a line
        model.rebuild(Viewport::new(205.0, 99.0));
        assert_eq!(model.count_on(Axis::Vertical), 11);
        assert_eq!(model.count_on(Axis::Horizontal), 5);
    }

    #[test]
    fn test_rebuild_discards_previous_lines() {
        let mut model = GridModel::new(20.0);
        model.rebuild(Viewport::new(400.0, 400.0));
        assert_eq!(model.lines().len(), 40);
        model.rebuild(Viewport::new(40.0, 20.0));
        assert_eq!(model.lines().len(), 3);
        assert!(model.lines().iter().all(|l| l.position < 40.0));
    }

    #[test]
    fn test_degenerate_viewport_has_no_lines() {
        let mut model = GridModel::new(20.0);
        model.rebuild(Viewport::new(0.0, 300.0));
        assert_eq!(model.count_on(Axis::Vertical), 0);
        assert_eq!(model.count_on(Axis::Horizontal), 15);

        let mut bad_gap = GridModel::new(0.0);
        bad_gap.rebuild(Viewport::new(300.0, 300.0));
        assert!(bad_gap.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut model = GridModel::new(20.0);
        model.rebuild(Viewport::new(100.0, 100.0));
        model.clear();
        assert!(model.is_empty());
        assert!(model.viewport().is_empty());
    }

    #[test]
    fn test_window_excludes_bounds() {
        // Pointer at x=100 with mass 100 and gap 20: index 5, reach 5
        let w = AffectedWindow::around(100.0, 100.0, 20.0);
        assert_eq!(w, AffectedWindow { start: 0, end: 11 });
        assert!(!w.contains(0));
        assert!(w.contains(1));
        assert!(w.contains(10));
        assert!(!w.contains(11));
    }

    #[test]
    fn test_window_fractional_pointer() {
        let w = AffectedWindow::around(101.0, 100.0, 20.0);
        assert_eq!(w.start, 0);
        assert_eq!(w.end, 12);
    }

    #[test]
    fn test_huge_extent_is_capped() {
        assert_eq!(line_count(1.0e12, 20.0), MAX_LINES_PER_AXIS);
        assert_eq!(line_count(50.0, 1.0e-6), MAX_LINES_PER_AXIS);
        assert_eq!(line_count(f32::MAX, 1.0), MAX_LINES_PER_AXIS);

        let mut model = GridModel::new(20.0);
        model.rebuild(Viewport::new(1.0e12, 100.0));
        assert_eq!(model.count_on(Axis::Vertical), MAX_LINES_PER_AXIS as usize);
        assert_eq!(model.count_on(Axis::Horizontal), 5);
    }

    proptest! {
        #[test]
        fn prop_integer_grid_has_exact_count(w in 0u32..2000, h in 0u32..2000, gap in 1u32..80) {
            let mut model = GridModel::new(gap as f32);
            model.rebuild(Viewport::new(w as f32, h as f32));
            prop_assert_eq!(model.count_on(Axis::Vertical), w.div_ceil(gap) as usize);
            prop_assert_eq!(model.count_on(Axis::Horizontal), h.div_ceil(gap) as usize);
        }

        #[test]
        fn prop_lines_spaced_by_gap(w in 0.0f32..2000.0, h in 0.0f32..2000.0, gap in 1.0f32..80.0) {
            let mut model = GridModel::new(gap);
            let vp = Viewport::new(w, h);
            model.rebuild(vp);
            for axis in Axis::ALL {
                let lines: Vec<_> = model.lines_on(axis).collect();
                let expected = line_count(vp.span(axis), gap) as usize;
                if lines.len() != expected {
                    // Only the last line may be dropped, and only when it lands on the edge
                    prop_assert_eq!(lines.len() + 1, expected);
                    prop_assert!((expected - 1) as f32 * gap >= vp.span(axis));
                }
                for (i, line) in lines.iter().enumerate() {
                    prop_assert_eq!(line.index as usize, i);
                    prop_assert!((line.position - i as f32 * gap).abs() < 1e-3);
                    prop_assert!(line.position < vp.span(axis));
                }
            }
        }
    }
}
