//! Browser mounts for the warp grid and LSD text
//!
//! Each mount owns its JS closures. `unmount` (also run on drop) detaches
//! every observer, listener and timer so no callback outlives the mount.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlCanvasElement, MouseEvent, ResizeObserver, ResizeObserverEntry};

use crate::error::{Result, WarpError};
use crate::grid::{Viewport, WarpEvent, WarpGrid};
use crate::lsd::{self, LsdText};
use crate::renderer::{self, CanvasSurface, Surface, SvgElementSurface};
use crate::settings::{LsdConfig, SurfaceKind, WarpConfig};

/// Grid state plus the surface it draws to
struct WarpView {
    grid: WarpGrid,
    surface: Box<dyn Surface>,
}

impl WarpView {
    fn apply(&mut self, event: WarpEvent) {
        let frame = self.grid.handle(event);
        renderer::draw(self.surface.as_mut(), frame);
    }
}

/// Position of a mouse event relative to the top-left of `target`
fn local_position(event: &MouseEvent, target: &Element) -> Vec2 {
    let rect = target.get_bounding_client_rect();
    Vec2::new(
        event.client_x() as f32 - rect.left() as f32,
        event.client_y() as f32 - rect.top() as f32,
    )
}

/// A warp grid attached to a canvas or svg element
pub struct WarpMount {
    target: Element,
    view: Rc<RefCell<WarpView>>,
    observer: Option<ResizeObserver>,
    on_resize: Option<Closure<dyn FnMut(js_sys::Array)>>,
    on_move: Option<Closure<dyn FnMut(MouseEvent)>>,
    on_leave: Option<Closure<dyn FnMut(MouseEvent)>>,
}

impl WarpMount {
    /// Mount on a 2D canvas; fails if the context is unavailable
    pub fn canvas(canvas: HtmlCanvasElement, config: &WarpConfig) -> Result<Self> {
        let surface = CanvasSurface::new(canvas.clone())?;
        Self::attach(canvas.into(), Box::new(surface), config)
    }

    /// Mount on an `<svg>` element
    pub fn svg(element: Element, config: &WarpConfig) -> Result<Self> {
        let surface = SvgElementSurface::new(element.clone())?;
        Self::attach(element, Box::new(surface), config)
    }

    /// Mount on whichever surface kind `element` is
    pub fn element(element: Element, config: &WarpConfig) -> Result<Self> {
        match SurfaceKind::from_tag(&element.tag_name()) {
            Some(SurfaceKind::Canvas) => {
                let canvas = element
                    .dyn_into::<HtmlCanvasElement>()
                    .map_err(|_| WarpError::MissingTarget("element is not a canvas".into()))?;
                Self::canvas(canvas, config)
            }
            Some(SurfaceKind::Svg) => Self::svg(element, config),
            None => Err(WarpError::MissingTarget(format!(
                "<{}> cannot host the warp grid",
                element.tag_name().to_lowercase()
            ))),
        }
    }

    fn attach(target: Element, surface: Box<dyn Surface>, config: &WarpConfig) -> Result<Self> {
        let view = Rc::new(RefCell::new(WarpView {
            grid: WarpGrid::new(config),
            surface,
        }));

        // Dropping a partially attached mount detaches whatever was installed
        let mut mount = Self {
            target: target.clone(),
            view: view.clone(),
            observer: None,
            on_resize: None,
            on_move: None,
            on_leave: None,
        };

        let on_resize = {
            let view = view.clone();
            Closure::<dyn FnMut(_)>::new(move |entries: js_sys::Array| {
                let Ok(entry) = entries.get(0).dyn_into::<ResizeObserverEntry>() else {
                    return;
                };
                let rect = entry.content_rect();
                view.borrow_mut().apply(WarpEvent::Resize(Viewport::new(
                    rect.width() as f32,
                    rect.height() as f32,
                )));
            })
        };
        // Fires once on observe; every frame is sized from the content box
        let observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref()).map_err(WarpError::host)?;
        observer.observe(&target);
        mount.observer = Some(observer);
        mount.on_resize = Some(on_resize);

        let on_move = {
            let view = view.clone();
            let target = target.clone();
            Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = local_position(&event, &target);
                view.borrow_mut().apply(WarpEvent::PointerMove(pos));
            })
        };
        target
            .add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())
            .map_err(WarpError::host)?;
        mount.on_move = Some(on_move);

        let on_leave = {
            let view = view.clone();
            Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                view.borrow_mut().apply(WarpEvent::PointerLeave);
            })
        };
        target
            .add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())
            .map_err(WarpError::host)?;
        mount.on_leave = Some(on_leave);

        log::info!(
            "Warp grid mounted on <{}> (gap {}, mass {})",
            target.tag_name().to_lowercase(),
            config.gap,
            config.mass
        );
        Ok(mount)
    }

    pub fn is_mounted(&self) -> bool {
        self.observer.is_some()
    }

    /// Detach observer and listeners and release every line; safe to repeat
    pub fn unmount(&mut self) {
        let was_mounted = self.is_mounted();

        if let Some(observer) = self.observer.take() {
            observer.unobserve(&self.target);
            observer.disconnect();
        }
        self.on_resize = None;

        if let Some(on_move) = self.on_move.take() {
            let _ = self
                .target
                .remove_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref());
        }
        if let Some(on_leave) = self.on_leave.take() {
            let _ = self
                .target
                .remove_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref());
        }

        if let Ok(mut view) = self.view.try_borrow_mut() {
            view.grid.clear();
        }

        if was_mounted {
            log::info!("Warp grid unmounted");
        }
    }
}

impl Drop for WarpMount {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Split text whose characters restyle on an interval
pub struct LsdMount {
    target: Element,
    original_text: String,
    original_class: String,
    /// Text has been replaced by spans
    split: bool,
    interval: Option<i32>,
    on_tick: Option<Closure<dyn FnMut()>>,
}

struct LsdView {
    text: LsdText,
    spans: Vec<Element>,
}

impl LsdView {
    fn paint(&self) {
        for (span, glyph) in self.spans.iter().zip(self.text.glyphs()) {
            let _ = span.set_attribute("style", &glyph.css());
        }
    }
}

impl LsdMount {
    pub fn new(target: Element, seed: u64, config: LsdConfig) -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| WarpError::MissingTarget("no window".into()))?;
        let document = target
            .owner_document()
            .ok_or_else(|| WarpError::MissingTarget("element has no document".into()))?;

        let original_text = target.text_content().unwrap_or_default();
        let interval_ms = config.interval_ms;
        let text = LsdText::new(&original_text, seed, config);

        let mut mount = Self {
            target: target.clone(),
            original_text,
            original_class: target.class_name(),
            split: false,
            interval: None,
            on_tick: None,
        };

        target.set_class_name(&lsd::host_class_name(&mount.original_class));
        target.set_text_content(None);
        mount.split = true;
        let mut spans = Vec::with_capacity(text.glyphs().len());
        for glyph in text.glyphs() {
            let span = document.create_element("span").map_err(WarpError::host)?;
            span.set_class_name(&glyph.class_name());
            span.set_text_content(Some(&glyph.ch.to_string()));
            target.append_child(&span).map_err(WarpError::host)?;
            spans.push(span);
        }

        let view = Rc::new(RefCell::new(LsdView { text, spans }));
        let on_tick = Closure::<dyn FnMut()>::new(move || {
            let mut view = view.borrow_mut();
            view.text.restyle();
            view.paint();
        });
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                on_tick.as_ref().unchecked_ref(),
                interval_ms.min(i32::MAX as u32) as i32,
            )
            .map_err(WarpError::host)?;
        mount.interval = Some(handle);
        mount.on_tick = Some(on_tick);

        log::info!("LSD text mounted ({} glyphs, every {}ms)", mount.original_text.chars().count(), interval_ms);
        Ok(mount)
    }

    pub fn is_mounted(&self) -> bool {
        self.interval.is_some()
    }

    /// Stop the timer and put the plain text back
    pub fn unmount(&mut self) {
        if let Some(handle) = self.interval.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
            log::info!("LSD text unmounted");
        }
        self.on_tick = None;
        if self.split {
            self.target.set_text_content(Some(&self.original_text));
            self.target.set_class_name(&self.original_class);
            self.split = false;
        }
    }
}

impl Drop for LsdMount {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Handle returned to JS hosts; call `unmount()` when the element goes away
#[wasm_bindgen]
pub struct WarpHandle {
    mount: Option<WarpMount>,
}

#[wasm_bindgen]
impl WarpHandle {
    pub fn unmount(&mut self) {
        if let Some(mut mount) = self.mount.take() {
            mount.unmount();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.mount.as_ref().is_some_and(WarpMount::is_mounted)
    }
}

/// Mount the warp grid on a canvas or svg element
///
/// `config_json` overrides the element's `data-warp-config` attribute.
#[wasm_bindgen(js_name = mountWarpGrid)]
pub fn mount_warp_grid(element: Element, config_json: Option<String>) -> std::result::Result<WarpHandle, JsValue> {
    let config = match config_json {
        Some(json) => WarpConfig::from_json(&json)?,
        None => WarpConfig::from_attribute(element.get_attribute(WarpConfig::ATTRIBUTE)),
    };
    let mount = WarpMount::element(element, &config)?;
    Ok(WarpHandle { mount: Some(mount) })
}

#[wasm_bindgen]
pub struct LsdHandle {
    mount: Option<LsdMount>,
}

#[wasm_bindgen]
impl LsdHandle {
    pub fn unmount(&mut self) {
        if let Some(mut mount) = self.mount.take() {
            mount.unmount();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.mount.as_ref().is_some_and(LsdMount::is_mounted)
    }
}

/// Turn an element's text into LSD text
#[wasm_bindgen(js_name = mountLsdText)]
pub fn mount_lsd_text(element: Element, config_json: Option<String>) -> std::result::Result<LsdHandle, JsValue> {
    let config = match config_json {
        Some(json) => LsdConfig::from_json(&json)?,
        None => LsdConfig::from_attribute(element.get_attribute(LsdConfig::ATTRIBUTE)),
    };
    let seed = js_sys::Date::now() as u64;
    let mount = LsdMount::new(element, seed, config)?;
    Ok(LsdHandle { mount: Some(mount) })
}
