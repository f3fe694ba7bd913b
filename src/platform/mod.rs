//! Platform abstraction layer
//!
//! Handles the browser side of both effects:
//! - Mounting on canvas / svg / text elements
//! - Resize observation and pointer listeners
//! - Restyle timers
//! - Deterministic teardown on unmount

#[cfg(target_arch = "wasm32")]
pub mod web;
