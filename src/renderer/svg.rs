//! SVG string surface
//!
//! Builds one `<path>` element per stroked line. Usable anywhere (native
//! binary, tests, server-side rendering) and backs the live SVG element
//! surface on the web.

use std::fmt::Write;

use glam::Vec2;

use super::Surface;
use crate::grid::Viewport;

#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    viewport: Viewport,
    body: String,
    path: String,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// `<path>` elements of the last frame
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Complete standalone document
    pub fn document(&self) -> String {
        let Viewport { width, height } = self.viewport;
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">{body}</svg>"#,
            w = width,
            h = height,
            body = self.body
        )
    }

    fn push_point(&mut self, p: Vec2) {
        let _ = write!(self.path, "{} {}", p.x, p.y);
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.body.clear();
        self.path.clear();
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, to: Vec2) {
        self.path.push('M');
        self.push_point(to);
    }

    fn line_to(&mut self, to: Vec2) {
        self.path.push_str(" L");
        self.push_point(to);
    }

    fn quadratic_curve_to(&mut self, control: Vec2, to: Vec2) {
        self.path.push_str(" Q");
        self.push_point(control);
        self.path.push(' ');
        self.push_point(to);
    }

    fn stroke(&mut self, style: &str) {
        let _ = write!(
            self.body,
            r#"<path d="{}" fill="none" stroke="{}"/>"#,
            self.path,
            escape_attr(style)
        );
    }
}

/// Escape a value for a double-quoted XML attribute
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
