//! Browser surfaces: 2D canvas and live SVG element

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement};

use super::{Surface, SvgSurface};
use crate::error::{Result, WarpError};
use crate::grid::Viewport;

/// Canvas with its 2D context, acquired up front
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Fails immediately when the canvas has no usable 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(WarpError::host)?
            .ok_or_else(|| WarpError::ContextUnavailable("canvas returned no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| WarpError::ContextUnavailable("2d context has unexpected type".into()))?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, viewport: Viewport) {
        // Backing store follows the observed content box
        let width = viewport.width as u32;
        let height = viewport.height as u32;
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
        self.ctx
            .clear_rect(0.0, 0.0, f64::from(width), f64::from(height));
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, to: Vec2) {
        self.ctx.move_to(f64::from(to.x), f64::from(to.y));
    }

    fn line_to(&mut self, to: Vec2) {
        self.ctx.line_to(f64::from(to.x), f64::from(to.y));
    }

    fn quadratic_curve_to(&mut self, control: Vec2, to: Vec2) {
        self.ctx.quadratic_curve_to(
            f64::from(control.x),
            f64::from(control.y),
            f64::from(to.x),
            f64::from(to.y),
        );
    }

    fn stroke(&mut self, style: &str) {
        self.ctx.set_stroke_style_str(style);
        self.ctx.stroke();
        self.ctx.close_path();
    }
}

/// `<svg>` element whose children are replaced on every frame
pub struct SvgElementSurface {
    element: Element,
    markup: SvgSurface,
}

impl SvgElementSurface {
    pub fn new(element: Element) -> Result<Self> {
        if !element.tag_name().eq_ignore_ascii_case("svg") {
            return Err(WarpError::ContextUnavailable(format!(
                "<{}> is not an svg element",
                element.tag_name()
            )));
        }
        Ok(Self {
            element,
            markup: SvgSurface::new(),
        })
    }

    pub fn element(&self) -> &Element {
        &self.element
    }
}

impl Surface for SvgElementSurface {
    fn clear(&mut self, viewport: Viewport) {
        self.markup.clear(viewport);
        let view_box = format!("0 0 {} {}", viewport.width, viewport.height);
        let _ = self.element.set_attribute("viewBox", &view_box);
    }

    fn begin_path(&mut self) {
        self.markup.begin_path();
    }

    fn move_to(&mut self, to: Vec2) {
        self.markup.move_to(to);
    }

    fn line_to(&mut self, to: Vec2) {
        self.markup.line_to(to);
    }

    fn quadratic_curve_to(&mut self, control: Vec2, to: Vec2) {
        self.markup.quadratic_curve_to(control, to);
    }

    fn stroke(&mut self, style: &str) {
        self.markup.stroke(style);
    }

    fn present(&mut self) {
        self.element.set_inner_html(self.markup.body());
    }
}
