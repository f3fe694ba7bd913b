//! Grid rendering
//!
//! `draw` walks a [`Frame`] and issues path calls against a [`Surface`]:
//! straight segments as `line_to`, arc segments as `quadratic_curve_to`.
//! Surfaces hold no state between frames beyond what `clear` resets.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod svg;

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasSurface, SvgElementSurface};
pub use svg::SvgSurface;

use glam::Vec2;

use crate::grid::{Frame, LinePath, Viewport};

/// Anything that can stroke 2D paths
pub trait Surface {
    /// Erase everything and size the surface to `viewport`
    fn clear(&mut self, viewport: Viewport);
    fn begin_path(&mut self);
    fn move_to(&mut self, to: Vec2);
    fn line_to(&mut self, to: Vec2);
    fn quadratic_curve_to(&mut self, control: Vec2, to: Vec2);
    /// Stroke the current path
    fn stroke(&mut self, style: &str);
    /// Flush the finished frame to the host, if the surface buffers
    fn present(&mut self) {}
}

/// A single drawing instruction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { control: Vec2, to: Vec2 },
}

/// Drawing instructions for one line path
pub fn commands(path: &LinePath) -> impl Iterator<Item = PathCommand> + '_ {
    path.points.iter().enumerate().map(|(i, point)| {
        if i == 0 {
            return PathCommand::MoveTo(point.at);
        }
        match point.control {
            Some(control) => PathCommand::QuadTo {
                control,
                to: point.at,
            },
            None => PathCommand::LineTo(point.at),
        }
    })
}

/// Issue one line path as the surface's current path
pub fn trace<S: Surface + ?Sized>(surface: &mut S, path: &LinePath) {
    surface.begin_path();
    for command in commands(path) {
        match command {
            PathCommand::MoveTo(to) => surface.move_to(to),
            PathCommand::LineTo(to) => surface.line_to(to),
            PathCommand::QuadTo { control, to } => surface.quadratic_curve_to(control, to),
        }
    }
}

/// Clear the surface and stroke every line in the frame
pub fn draw<S: Surface + ?Sized>(surface: &mut S, frame: &Frame) {
    surface.clear(frame.viewport);
    for path in &frame.paths {
        trace(surface, path);
        surface.stroke(&frame.stroke_style);
    }
    surface.present();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::WarpGrid;
    use crate::settings::WarpConfig;

    /// Records calls for inspection
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Surface for Recorder {
        fn clear(&mut self, viewport: Viewport) {
            self.calls.push(format!("clear {} {}", viewport.width, viewport.height));
        }
        fn begin_path(&mut self) {
            self.calls.push("begin".into());
        }
        fn move_to(&mut self, to: Vec2) {
            self.calls.push(format!("M {} {}", to.x, to.y));
        }
        fn line_to(&mut self, to: Vec2) {
            self.calls.push(format!("L {} {}", to.x, to.y));
        }
        fn quadratic_curve_to(&mut self, control: Vec2, to: Vec2) {
            self.calls
                .push(format!("Q {} {} {} {}", control.x, control.y, to.x, to.y));
        }
        fn stroke(&mut self, style: &str) {
            self.calls.push(format!("stroke {}", style));
        }
        fn present(&mut self) {
            self.calls.push("present".into());
        }
    }

    #[test]
    fn test_flat_frame_calls() {
        let mut warp = WarpGrid::new(&WarpConfig::default());
        let frame = warp.resize(40.0, 20.0);
        let mut rec = Recorder::default();
        draw(&mut rec, frame);
        assert_eq!(
            rec.calls,
            vec![
                "clear 40 20",
                "begin",
                "M 0 0",
                "L 0 20",
                "stroke #96ADE9",
                "begin",
                "M 20 0",
                "L 20 20",
                "stroke #96ADE9",
                "begin",
                "M 0 0",
                "L 40 0",
                "stroke #96ADE9",
                "present",
            ]
        );
    }

    #[test]
    fn test_deformed_line_uses_quadratics() {
        let mut warp = WarpGrid::new(&WarpConfig::default());
        warp.resize(200.0, 100.0);
        let frame = warp.pointer_move(100.0, 50.0);
        let deformed = frame.paths.iter().find(|p| p.is_deformed()).cloned();
        let Some(path) = deformed else {
            panic!("expected a deformed line");
        };
        let cmds: Vec<PathCommand> = commands(&path).collect();
        assert_eq!(cmds.len(), 7);
        assert!(matches!(cmds[0], PathCommand::MoveTo(_)));
        assert!(matches!(cmds[1], PathCommand::LineTo(_)));
        assert!(cmds[2..6].iter().all(|c| matches!(c, PathCommand::QuadTo { .. })));
        assert!(matches!(cmds[6], PathCommand::LineTo(_)));
    }

    #[test]
    fn test_empty_frame_only_clears() {
        let mut rec = Recorder::default();
        draw(&mut rec, &Frame::default());
        assert_eq!(rec.calls, vec!["clear 0 0", "present"]);
    }
}
