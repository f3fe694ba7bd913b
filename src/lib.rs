//! Warp Grid - pointer-reactive grid and psychedelic text effects
//!
//! Core modules:
//! - `grid`: Pure grid model, distortion, and event state machine
//! - `renderer`: Drawing surfaces (SVG string, canvas, svg element)
//! - `lsd`: Randomly restyled text
//! - `platform`: Browser mounts, listeners, and teardown
//! - `settings`: Effect configuration

pub mod error;
pub mod grid;
pub mod lsd;
pub mod platform;
pub mod renderer;
pub mod settings;

pub use error::{Result, WarpError};
pub use grid::{Frame, WarpEvent, WarpGrid};
pub use settings::{LsdConfig, SurfaceKind, WarpConfig};

/// Effect configuration defaults
pub mod consts {
    /// Grid spacing in pixels
    pub const DEFAULT_GAP: f32 = 20.0;
    /// Influence radius around the pointer in pixels
    pub const DEFAULT_MASS: f32 = 100.0;
    /// Smallest accepted grid spacing in pixels
    pub const MIN_GAP: f32 = 1.0;
    /// Upper bound on lines per axis, whatever the viewport
    pub const MAX_LINES_PER_AXIS: u32 = 10_000;
    /// Light blue grid lines
    pub const DEFAULT_STROKE_STYLE: &str = "#96ADE9";

    /// Milliseconds between LSD restyles
    pub const LSD_INTERVAL_MS: u32 = 300;
    /// Shortest accepted restyle interval (~one frame)
    pub const LSD_MIN_INTERVAL_MS: u32 = 16;
    pub const LSD_BASE_FONT_SIZE: u32 = 48;
    pub const LSD_FONT_SIZE_JITTER: u32 = 12;
    pub const LSD_SHADOW_MAX: u32 = 5;
}

/// Render one frame of the grid as a standalone SVG document
pub fn render_svg(config: &WarpConfig, width: f32, height: f32, pointer: Option<(f32, f32)>) -> String {
    let mut warp = WarpGrid::new(config);
    warp.resize(width, height);
    let frame = match pointer {
        Some((x, y)) => warp.pointer_move(x, y),
        None => warp.frame(),
    };
    let mut svg = renderer::SvgSurface::new();
    renderer::draw(&mut svg, frame);
    svg.document()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_svg_counts_paths() {
        let flat = render_svg(&WarpConfig::default(), 200.0, 100.0, None);
        assert_eq!(flat.matches("<path").count(), 15);
        assert!(!flat.contains(" Q"));

        let warped = render_svg(&WarpConfig::default(), 200.0, 100.0, Some((100.0, 50.0)));
        assert_eq!(warped.matches("<path").count(), 15);
        assert_eq!(warped.matches(" Q").count(), 14 * 4);
    }

    #[test]
    fn test_render_svg_empty_viewport() {
        let svg = render_svg(&WarpConfig::default(), 0.0, 0.0, Some((5.0, 5.0)));
        assert_eq!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="0" height="0" viewBox="0 0 0 0"></svg>"#
        );
    }
}
