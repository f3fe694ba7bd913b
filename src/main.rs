//! Warp Grid entry point
//!
//! On the web, mounts the effects on the page. Natively, prints one SVG frame.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;

    use wasm_bindgen::JsCast;
    use web_sys::Element;

    use warp_grid::platform::web::{LsdMount, WarpMount};
    use warp_grid::{LsdConfig, WarpConfig};

    thread_local! {
        // Mounts live for the page lifetime
        static WARP: RefCell<Option<WarpMount>> = const { RefCell::new(None) };
        static LSD: RefCell<Vec<LsdMount>> = const { RefCell::new(Vec::new()) };
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Warp Grid starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document; effects disabled");
            return;
        };

        // Warp grid on #warp-grid (canvas or svg)
        if let Some(target) = document.get_element_by_id("warp-grid") {
            let config = WarpConfig::from_attribute(target.get_attribute(WarpConfig::ATTRIBUTE));
            match WarpMount::element(target, &config) {
                Ok(mount) => WARP.with(|slot| *slot.borrow_mut() = Some(mount)),
                Err(e) => log::error!("Warp grid disabled: {}", e),
            }
        } else {
            log::info!("No #warp-grid element on this page");
        }

        // LSD text on every [data-lsd]
        if let Ok(nodes) = document.query_selector_all("[data-lsd]") {
            let seed = js_sys::Date::now() as u64;
            for i in 0..nodes.length() {
                let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                    continue;
                };
                let config = LsdConfig::from_attribute(element.get_attribute(LsdConfig::ATTRIBUTE));
                match LsdMount::new(element, seed.wrapping_add(u64::from(i)), config) {
                    Ok(mount) => LSD.with(|mounts| mounts.borrow_mut().push(mount)),
                    Err(e) => log::error!("LSD text disabled: {}", e),
                }
            }
        }

        log::info!("Warp Grid running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_page::run();
}

/// Frame requested on the command line
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, PartialEq)]
struct RenderArgs {
    width: f32,
    height: f32,
    pointer: Option<(f32, f32)>,
}

#[cfg(not(target_arch = "wasm32"))]
const USAGE: &str = "usage: warp-grid [WIDTH HEIGHT [X Y]]";

/// Parse `[WIDTH HEIGHT [X Y]]`; every given argument must be a number
#[cfg(not(target_arch = "wasm32"))]
fn parse_args(args: &[String]) -> warp_grid::Result<RenderArgs> {
    let numbers = args
        .iter()
        .enumerate()
        .map(|(i, arg)| {
            arg.parse::<f32>().map_err(|_| {
                warp_grid::WarpError::Config(format!("argument {} is not a number: {:?}", i + 1, arg))
            })
        })
        .collect::<warp_grid::Result<Vec<f32>>>()?;

    match numbers.as_slice() {
        [] => Ok(RenderArgs {
            width: 200.0,
            height: 100.0,
            pointer: None,
        }),
        [w, h] => Ok(RenderArgs {
            width: *w,
            height: *h,
            pointer: None,
        }),
        [w, h, x, y] => Ok(RenderArgs {
            width: *w,
            height: *h,
            pointer: Some((*x, *y)),
        }),
        _ => Err(warp_grid::WarpError::Config(format!(
            "expected 0, 2 or 4 arguments, got {}",
            numbers.len()
        ))),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let RenderArgs { width, height, pointer } = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let config = match std::env::var("WARP_CONFIG") {
        Ok(json) => warp_grid::WarpConfig::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring WARP_CONFIG: {}", e);
            warp_grid::WarpConfig::default()
        }),
        Err(_) => warp_grid::WarpConfig::default(),
    };

    log::info!("Rendering {}x{} grid, pointer {:?}", width, height, pointer);
    println!("{}", warp_grid::render_svg(&config, width, height, pointer));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_by_position() {
        assert_eq!(parse_args(&[]).unwrap().width, 200.0);
        let parsed = parse_args(&args(&["300", "150"])).unwrap();
        assert_eq!((parsed.width, parsed.height, parsed.pointer), (300.0, 150.0, None));
        let parsed = parse_args(&args(&["300", "150", "10", "20.5"])).unwrap();
        assert_eq!(parsed.pointer, Some((10.0, 20.5)));
    }

    #[test]
    fn test_parse_args_rejects_bad_input() {
        // A bad argument is an error, not skipped
        let err = parse_args(&args(&["abc", "200", "100"])).unwrap_err();
        assert!(err.to_string().contains("argument 1"));
        assert!(parse_args(&args(&["200", "abc"])).is_err());
        assert!(parse_args(&args(&["200"])).is_err());
        assert!(parse_args(&args(&["1", "2", "3"])).is_err());
    }
}
