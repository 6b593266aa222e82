//! `tileClicked` listener registry.
//!
//! Listeners are kept in subscription order, one list per event kind.
//! Identity is whatever `PartialEq` says for the listener type: a
//! `js_sys::Function` compares with `===`, a [`Callback`] by pointer. The
//! caller must hand the same value to `unsubscribe` that it gave to
//! `subscribe`.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use wasm_bindgen::JsValue;

use crate::consts::TILE_CLICKED_EVENT;
use crate::error::{ViewerError, describe_js};
use crate::iso::TilePos;

/// Events the viewer emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    TileClicked,
}

impl FromStr for EventKind {
    type Err = ViewerError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            TILE_CLICKED_EVENT => Ok(Self::TileClicked),
            other => Err(ViewerError::UnknownEvent(other.to_string())),
        }
    }
}

/// Receiver of `tileClicked`.
pub trait TileClickListener: Clone + PartialEq {
    fn tile_clicked(&self, tile: TilePos);
}

impl TileClickListener for js_sys::Function {
    fn tile_clicked(&self, tile: TilePos) {
        let result = self.call2(&JsValue::NULL, &JsValue::from(tile.x), &JsValue::from(tile.y));
        if let Err(err) = result {
            log::warn!("tileClicked listener threw: {}", describe_js(&err));
        }
    }
}

/// Rust-side listener compared by pointer identity.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn(TilePos)>);

impl Callback {
    pub fn new(f: impl Fn(TilePos) + 'static) -> Self {
        Self(Rc::new(f))
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback").field(&Rc::as_ptr(&self.0)).finish()
    }
}

impl TileClickListener for Callback {
    fn tile_clicked(&self, tile: TilePos) {
        (self.0)(tile);
    }
}

/// One ordered listener list per event kind.
#[derive(Debug)]
pub struct Listeners<L> {
    tile_clicked: Vec<L>,
}

impl<L> Default for Listeners<L> {
    fn default() -> Self {
        Self { tile_clicked: Vec::new() }
    }
}

impl<L: TileClickListener> Listeners<L> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `listener` to the list for `kind`.
    pub fn subscribe(&mut self, kind: EventKind, listener: L) {
        match kind {
            EventKind::TileClicked => self.tile_clicked.push(listener),
        }
    }

    /// Remove the earliest entry equal to `listener`. Unknown listeners are ignored.
    pub fn unsubscribe(&mut self, kind: EventKind, listener: &L) {
        let list = match kind {
            EventKind::TileClicked => &mut self.tile_clicked,
        };
        if let Some(index) = list.iter().position(|l| l == listener) {
            list.remove(index);
        }
    }

    /// Listeners for `tileClicked` as of now, in subscription order.
    ///
    /// Hosts emit from this snapshot so listeners may subscribe or
    /// unsubscribe while being called.
    #[must_use]
    pub fn tile_clicked_snapshot(&self) -> Vec<L> {
        self.tile_clicked.clone()
    }
}

/// Call each listener in `listeners` with `tile`.
pub fn emit_tile_clicked<L: TileClickListener>(listeners: &[L], tile: TilePos) {
    for listener in listeners {
        listener.tile_clicked(tile);
    }
}
