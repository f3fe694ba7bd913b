//! Warp grid state machine
//!
//! Resize, pointer-move and pointer-leave each trigger a full recompute of
//! every line path. The resulting [`Frame`] is what the renderer draws.

use glam::Vec2;

use super::distort::{DistortionParams, LinePath, PointerState, distort};
use super::line::{Axis, Viewport};
use super::model::GridModel;
use crate::settings::WarpConfig;

/// Input delivered by the host surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WarpEvent {
    Resize(Viewport),
    PointerMove(Vec2),
    PointerLeave,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub viewport: Viewport,
    pub stroke_style: String,
    pub paths: Vec<LinePath>,
}

impl Frame {
    pub fn deformed_count(&self) -> usize {
        self.paths.iter().filter(|p| p.is_deformed()).count()
    }

    pub fn is_flat(&self) -> bool {
        self.paths.iter().all(|p| !p.is_deformed())
    }

    pub fn paths_on(&self, axis: Axis) -> impl Iterator<Item = &LinePath> {
        self.paths.iter().filter(move |p| p.line.axis == axis)
    }
}

/// Grid model plus pointer, recomputed on every event
#[derive(Debug, Clone)]
pub struct WarpGrid {
    params: DistortionParams,
    stroke_style: String,
    model: GridModel,
    pointer: PointerState,
    frame: Frame,
}

impl WarpGrid {
    pub fn new(config: &WarpConfig) -> Self {
        let params = config.params();
        Self {
            params,
            stroke_style: config.stroke_style.clone(),
            model: GridModel::new(params.gap),
            pointer: PointerState::Absent,
            frame: Frame {
                stroke_style: config.stroke_style.clone(),
                ..Default::default()
            },
        }
    }

    /// Apply one event and return the recomputed frame
    pub fn handle(&mut self, event: WarpEvent) -> &Frame {
        match event {
            WarpEvent::Resize(viewport) => {
                self.model.rebuild(viewport);
                log::info!(
                    "Grid rebuilt at {}x{}: {} vertical, {} horizontal lines",
                    viewport.width,
                    viewport.height,
                    self.model.count_on(Axis::Vertical),
                    self.model.count_on(Axis::Horizontal)
                );
            }
            WarpEvent::PointerMove(pos) => self.pointer = PointerState::At(pos),
            WarpEvent::PointerLeave => self.pointer = PointerState::Absent,
        }
        self.recompute();
        &self.frame
    }

    pub fn resize(&mut self, width: f32, height: f32) -> &Frame {
        self.handle(WarpEvent::Resize(Viewport::new(width, height)))
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> &Frame {
        self.handle(WarpEvent::PointerMove(Vec2::new(x, y)))
    }

    pub fn pointer_leave(&mut self) -> &Frame {
        self.handle(WarpEvent::PointerLeave)
    }

    /// Release every line and forget the pointer (unmount)
    pub fn clear(&mut self) {
        self.model.clear();
        self.pointer = PointerState::Absent;
        self.frame.paths.clear();
        self.frame.viewport = Viewport::default();
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn model(&self) -> &GridModel {
        &self.model
    }

    pub fn params(&self) -> &DistortionParams {
        &self.params
    }

    fn recompute(&mut self) {
        let params = &self.params;
        let pointer = self.pointer;
        self.frame.viewport = self.model.viewport();
        self.frame.stroke_style.clone_from(&self.stroke_style);
        self.frame.paths.clear();
        self.frame.paths.extend(
            self.model
                .lines()
                .iter()
                .map(|line| distort(line, pointer, params)),
        );
        if pointer.is_present() {
            log::debug!("Pointer frame: {} lines deformed", self.frame.deformed_count());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> WarpGrid {
        WarpGrid::new(&WarpConfig::default())
    }

    #[test]
    fn test_scenario_200x100() {
        let mut warp = grid();
        warp.resize(200.0, 100.0);
        let frame = warp.pointer_move(100.0, 50.0);

        let vertical: Vec<(f32, bool)> = frame
            .paths_on(Axis::Vertical)
            .map(|p| (p.line.position, p.is_deformed()))
            .collect();
        assert_eq!(vertical.len(), 10);
        for (x, deformed) in vertical {
            assert_eq!(deformed, (x - 100.0).abs() < 100.0, "x={}", x);
        }
        // x=0 sits exactly on the boundary
        assert_eq!(frame.paths_on(Axis::Vertical).filter(|p| p.is_deformed()).count(), 9);

        assert!(frame.paths_on(Axis::Horizontal).all(|p| p.is_deformed()));
        assert_eq!(frame.deformed_count(), 14);
    }

    #[test]
    fn test_pointer_leave_restores_flat_grid() {
        let mut warp = grid();
        let flat = warp.resize(300.0, 200.0).clone();
        assert!(flat.is_flat());

        warp.pointer_move(120.0, 80.0);
        assert!(!warp.frame().is_flat());

        let after = warp.pointer_leave();
        assert!(after.is_flat());
        assert_eq!(*after, flat);
    }

    #[test]
    fn test_pointer_outside_influence_matches_flat() {
        let mut warp = grid();
        let flat = warp.resize(200.0, 100.0).clone();
        let far = warp.pointer_move(1000.0, 1000.0);
        assert_eq!(*far, flat);
    }

    #[test]
    fn test_same_input_same_frame() {
        let mut warp = grid();
        warp.resize(240.0, 160.0);
        let first = warp.pointer_move(64.0, 90.0).clone();
        let second = warp.pointer_move(64.0, 90.0).clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resize_keeps_pointer() {
        let mut warp = grid();
        warp.resize(100.0, 100.0);
        warp.pointer_move(50.0, 50.0);
        let frame = warp.resize(400.0, 400.0);
        assert_eq!(frame.paths.len(), 40);
        assert!(frame.deformed_count() > 0);
        assert_eq!(frame.viewport, Viewport::new(400.0, 400.0));
    }

    #[test]
    fn test_pointer_before_first_resize() {
        // The mount is sized only once the resize observer first reports
        let mut warp = grid();
        assert!(warp.pointer_move(100.0, 50.0).paths.is_empty());

        let frame = warp.resize(200.0, 100.0);
        assert_eq!(frame.paths.len(), 15);
        assert_eq!(frame.deformed_count(), 14);
    }

    #[test]
    fn test_zero_viewport_has_no_paths() {
        let mut warp = grid();
        let frame = warp.resize(0.0, 0.0);
        assert!(frame.paths.is_empty());
        let frame = warp.pointer_move(10.0, 10.0);
        assert!(frame.paths.is_empty());
    }

    #[test]
    fn test_clear_releases_lines() {
        let mut warp = grid();
        warp.resize(200.0, 200.0);
        warp.pointer_move(10.0, 10.0);
        warp.clear();
        assert!(warp.model().is_empty());
        assert!(warp.frame().paths.is_empty());
        assert!(!warp.pointer().is_present());

        // Remount
        assert_eq!(warp.resize(200.0, 200.0).paths.len(), 20);
    }
}
