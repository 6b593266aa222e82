//! Viewer configuration supplied by the host page.
//!
//! Every field is optional on the JavaScript side; missing fields take the
//! defaults from [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::consts::{
    CLICK_THRESHOLD_PX, DEFAULT_TILE_HEIGHT, DEFAULT_TILE_WIDTH, SELECTION_ASSET, SELECTION_DOWN_ASSET,
};
use crate::error::ConfigError;
use crate::iso::IsoProjection;

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Tile sprite width in pixels.
    pub tile_width: u32,
    /// Tile sprite height in pixels.
    pub tile_height: u32,
    /// Largest press-to-release distance, in CSS pixels, that counts as a click.
    pub click_threshold: f64,
    /// Asset drawn on the hovered tile.
    pub selection_asset: String,
    /// Asset drawn on the hovered tile while pressed.
    pub selection_down_asset: String,
    /// Console log level (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            tile_width: DEFAULT_TILE_WIDTH,
            tile_height: DEFAULT_TILE_HEIGHT,
            click_threshold: CLICK_THRESHOLD_PX,
            selection_asset: SELECTION_ASSET.to_string(),
            selection_down_asset: SELECTION_DOWN_ASSET.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ViewerConfig {
    /// Decode and validate a config from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Decode`] for malformed JSON or unknown fields,
    /// or any error from [`Self::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Decode and validate a config from a plain JS object.
    ///
    /// `undefined` and `null` give the defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_json`].
    pub fn from_js(value: &JsValue) -> Result<Self, ConfigError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        let json = js_sys::JSON::stringify(value)
            .ok()
            .and_then(|s| s.as_string())
            .unwrap_or_default();
        Self::from_json(&json)
    }

    /// Check the values a deserializer cannot.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(ConfigError::ZeroTileSize {
                width: self.tile_width,
                height: self.tile_height,
            });
        }
        if !self.click_threshold.is_finite() || self.click_threshold < 0.0 {
            return Err(ConfigError::InvalidClickThreshold(self.click_threshold));
        }
        self.level()?;
        Ok(())
    }

    /// Parsed [`Self::log_level`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogLevel`] for names `log` does not know.
    pub fn level(&self) -> Result<log::Level, ConfigError> {
        self.log_level
            .parse::<log::Level>()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// Projection for the configured tile size.
    #[must_use]
    pub fn projection(&self) -> IsoProjection {
        IsoProjection::new(self.tile_width, self.tile_height)
    }
}
