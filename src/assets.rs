//! Named visuals and their readiness.
//!
//! Loading happens outside the viewer's control: the browser decodes an
//! `HtmlImageElement` in the background and the renderer polls
//! [`AssetRegistry::get_ready`] each frame. A visual that never finishes
//! loading, or a name that was never registered, simply never draws.

#[cfg(test)]
#[path = "assets_test.rs"]
mod assets_test;

use std::collections::HashMap;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlImageElement, Url};

use crate::error::{ViewerError, describe_js};

/// Something the renderer can draw once it has decoded.
pub trait Visual {
    /// Decoding has finished (successfully or not).
    fn is_decoded(&self) -> bool;

    /// Natural size in pixels; `(0, 0)` until decoded or after a failed load.
    fn natural_size(&self) -> (u32, u32);

    /// Decoded with non-zero dimensions.
    fn is_ready(&self) -> bool {
        let (w, h) = self.natural_size();
        self.is_decoded() && w > 0 && h > 0
    }
}

impl Visual for HtmlImageElement {
    fn is_decoded(&self) -> bool {
        self.complete()
    }

    fn natural_size(&self) -> (u32, u32) {
        (self.natural_width(), self.natural_height())
    }
}

/// Where an image's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// Any URL the browser can fetch, including `data:` URLs.
    Url(String),
    /// Encoded image bytes (PNG, JPEG, ...).
    Bytes(Vec<u8>),
}

impl AssetSource {
    /// Interpret a JS value as a source: a string, `Uint8Array` or `ArrayBuffer`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Dom`] for any other value.
    pub fn from_js(value: &JsValue) -> Result<Self, ViewerError> {
        if let Some(url) = value.as_string() {
            return Ok(Self::Url(url));
        }
        if let Some(bytes) = value.dyn_ref::<js_sys::Uint8Array>() {
            return Ok(Self::Bytes(bytes.to_vec()));
        }
        if let Some(buffer) = value.dyn_ref::<js_sys::ArrayBuffer>() {
            return Ok(Self::Bytes(js_sys::Uint8Array::new(buffer).to_vec()));
        }
        Err(ViewerError::Dom(String::from(
            "image source must be a string, Uint8Array or ArrayBuffer",
        )))
    }
}

/// Name-to-visual map queried read-only by the renderer.
#[derive(Debug)]
pub struct AssetRegistry<V> {
    assets: HashMap<String, V>,
}

impl<V> Default for AssetRegistry<V> {
    fn default() -> Self {
        Self { assets: HashMap::new() }
    }
}

impl<V: Visual> AssetRegistry<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `visual` under `name`, replacing any earlier registration.
    pub fn register(&mut self, name: impl Into<String>, visual: V) {
        let name = name.into();
        if self.assets.insert(name.clone(), visual).is_some() {
            log::debug!("asset '{name}' replaced");
        } else {
            log::debug!("asset '{name}' registered");
        }
    }

    /// Remove and return the visual under `name`.
    pub fn unregister(&mut self, name: &str) -> Option<V> {
        self.assets.remove(name)
    }

    /// The visual under `name` is decoded with non-zero dimensions.
    #[must_use]
    pub fn is_ready(&self, name: &str) -> bool {
        self.assets.get(name).is_some_and(Visual::is_ready)
    }

    /// Natural size of a ready visual.
    #[must_use]
    pub fn dimensions(&self, name: &str) -> Option<(u32, u32)> {
        self.get_ready(name).map(|(_, w, h)| (w, h))
    }

    /// A ready visual with its natural size, or `None` if unknown or not ready.
    #[must_use]
    pub fn get_ready(&self, name: &str) -> Option<(&V, u32, u32)> {
        let visual = self.assets.get(name)?;
        if !visual.is_ready() {
            return None;
        }
        let (w, h) = visual.natural_size();
        Some((visual, w, h))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Create an image element and start loading `source` into it.
///
/// The element is returned immediately; it reports ready once the browser
/// has decoded it. Byte sources go through a blob URL that is revoked when
/// the load settles.
///
/// # Errors
///
/// Returns [`ViewerError::Dom`] if the element or blob URL cannot be created.
pub fn load_image(source: &AssetSource) -> Result<HtmlImageElement, ViewerError> {
    let img = HtmlImageElement::new().map_err(|e| ViewerError::Dom(describe_js(&e)))?;
    match source {
        AssetSource::Url(url) => img.set_src(url),
        AssetSource::Bytes(bytes) => {
            let url = blob_url(bytes)?;
            img.set_src(&url);
            revoke_when_settled(&img, url);
        }
    }
    Ok(img)
}

fn blob_url(bytes: &[u8]) -> Result<String, ViewerError> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = BlobPropertyBag::new();
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| ViewerError::Dom(describe_js(&e)))?;
    Url::create_object_url_with_blob(&blob).map_err(|e| ViewerError::Dom(describe_js(&e)))
}

fn revoke_when_settled(img: &HtmlImageElement, url: String) {
    for event in ["load", "error"] {
        let url = url.clone();
        gloo_events::EventListener::once(img, event, move |_| {
            let _ = Url::revoke_object_url(&url);
        })
        .forget();
    }
}
