//! Error types

use thiserror::Error;

/// Errors raised while mounting or configuring an effect
#[derive(Error, Debug)]
pub enum WarpError {
    /// The surface cannot provide a 2D drawing context
    #[error("2D drawing context unavailable: {0}")]
    ContextUnavailable(String),

    /// Mount element missing or of the wrong kind
    #[error("Mount target not found: {0}")]
    MissingTarget(String),

    /// A host (browser) call failed
    #[error("Host call failed: {0}")]
    Host(String),

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for effect operations
pub type Result<T> = std::result::Result<T, WarpError>;

#[cfg(target_arch = "wasm32")]
impl WarpError {
    /// Wrap a thrown JS value
    pub fn host(value: wasm_bindgen::JsValue) -> Self {
        WarpError::Host(format!("{:?}", value))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<WarpError> for wasm_bindgen::JsValue {
    fn from(err: WarpError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
