//! Error types for the viewer.
//!
//! Nothing here is fatal to the frame loop: map and config errors are
//! returned to whoever supplied the bad input, and render errors are logged
//! by the host and the next frame carries on.

use wasm_bindgen::{JsCast, JsValue};

/// Error returned when building a [`crate::map::TileMap`].
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// A populated cell had no base layer.
    #[error("tile ({x}, {y}) has an empty layer stack")]
    EmptyStack { x: i32, y: i32 },
    /// The supplied JSON did not have the nested-array shape.
    #[error("failed to decode map: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Error returned by [`crate::config::ViewerConfig::validate`] and its parsers.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Tile width or height was zero.
    #[error("tile dimensions must be non-zero, got {width}x{height}")]
    ZeroTileSize { width: u32, height: u32 },
    /// Click threshold was negative or not a number.
    #[error("click threshold must be a non-negative number, got {0}")]
    InvalidClickThreshold(f64),
    /// The log level string is not one `log` understands.
    #[error("unknown log level: {0}")]
    InvalidLogLevel(String),
    /// The supplied JSON could not be decoded.
    #[error("failed to decode config: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A drawing call rejected by the surface.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("canvas call failed: {0}")]
    Canvas(String),
}

/// Umbrella error for the public viewer API.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Map(#[from] MapError),
    #[error(transparent)]
    Render(#[from] RenderError),
    /// `on`/`off` was called with an event name the viewer does not emit.
    #[error("unknown event: {0}")]
    UnknownEvent(String),
    /// A browser API was missing or refused the request.
    #[error("browser error: {0}")]
    Dom(String),
}

impl From<ViewerError> for JsValue {
    fn from(err: ViewerError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Render a `JsValue` thrown by a browser API into a readable message.
#[must_use]
pub fn describe_js(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}
