//! Browser entry point: the `IsoView` class exported to JavaScript.
//!
//! ARCHITECTURE
//! ============
//! `IsoView` owns the shared viewer state behind `Rc<RefCell<_>>`. DOM
//! listeners on the canvas turn mouse and touch events into [`Pointer`]
//! lists and feed them to the [`EngineCore`] reducer; any `tileClicked`
//! actions it returns are emitted only after the engine borrow is released,
//! so listeners may call back into the viewer. A `requestAnimationFrame`
//! loop holding a `Weak` reference draws one frame per display refresh
//! until the `IsoView` is dropped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::{EventListener, EventListenerOptions};
use gloo_render::{AnimationFrame, request_animation_frame};
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlCanvasElement, MouseEvent, TouchEvent, TouchList};

use crate::assets::AssetSource;
use crate::config::ViewerConfig;
use crate::engine::{Action, Engine, EngineCore};
use crate::error::{ViewerError, describe_js};
use crate::events::{self, EventKind, Listeners};
use crate::input::{Button, Pointer};
use crate::iso::TilePos;
use crate::logging;
use crate::map::TileMap;
use crate::viewport::Point;

struct Shared {
    engine: RefCell<Engine>,
    listeners: RefCell<Listeners<js_sys::Function>>,
    frame: RefCell<Option<AnimationFrame>>,
}

/// Isometric tile-map viewer bound to one canvas.
#[wasm_bindgen]
pub struct IsoView {
    shared: Rc<Shared>,
    _dom_listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl IsoView {
    /// Attach to `canvas`, size it to its container and start drawing.
    ///
    /// `config` is an optional plain object; see [`ViewerConfig`].
    ///
    /// # Errors
    ///
    /// Throws if the config is invalid or the canvas has no 2D context.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config: JsValue) -> Result<IsoView, JsValue> {
        let config = ViewerConfig::from_js(&config).map_err(ViewerError::from)?;
        logging::init(config.level().unwrap_or(log::Level::Info));

        let engine = Engine::new(canvas.clone(), config)?;
        let shared = Rc::new(Shared {
            engine: RefCell::new(engine),
            listeners: RefCell::new(Listeners::new()),
            frame: RefCell::new(None),
        });
        let dom_listeners = install_listeners(&shared, &canvas)?;
        schedule_frame(&shared);

        log::info!("isoview attached to canvas");
        Ok(Self { shared, _dom_listeners: dom_listeners })
    }

    /// Start loading an image and register it under `name`.
    ///
    /// `source` is a URL string, a `Uint8Array` or an `ArrayBuffer`. A name
    /// registered again replaces the earlier image.
    ///
    /// # Errors
    ///
    /// Throws for any other source type.
    #[wasm_bindgen(js_name = registerImageAsset)]
    pub fn register_image_asset(&self, name: &str, source: JsValue) -> Result<(), JsValue> {
        let source = AssetSource::from_js(&source)?;
        self.shared.engine.borrow_mut().register_image(name, &source)?;
        Ok(())
    }

    /// Remove the image registered under `name`. Layers using it stop
    /// drawing from the next frame. Returns whether a registration existed.
    #[wasm_bindgen(js_name = unregisterImageAsset)]
    pub fn unregister_image_asset(&self, name: &str) -> bool {
        self.shared.engine.borrow_mut().unregister_image(name)
    }

    /// Subscribe `listener` to `event`. Only `"tileClicked"` exists; it is
    /// called with `(tileX, tileY)`.
    ///
    /// # Errors
    ///
    /// Throws for unknown event names.
    pub fn on(&self, event: &str, listener: js_sys::Function) -> Result<(), JsValue> {
        let kind: EventKind = event.parse()?;
        self.shared.listeners.borrow_mut().subscribe(kind, listener);
        Ok(())
    }

    /// Unsubscribe the exact function previously passed to [`Self::on`].
    /// Unknown listeners are ignored.
    ///
    /// # Errors
    ///
    /// Throws for unknown event names.
    pub fn off(&self, event: &str, listener: js_sys::Function) -> Result<(), JsValue> {
        let kind: EventKind = event.parse()?;
        self.shared.listeners.borrow_mut().unsubscribe(kind, &listener);
        Ok(())
    }

    /// The current map as nested arrays, `map[tileX][tileY]`.
    #[wasm_bindgen(getter)]
    pub fn map(&self) -> JsValue {
        let json = self.shared.engine.borrow().core.map.to_json();
        js_sys::JSON::parse(&json).unwrap_or(JsValue::NULL)
    }

    /// Replace the map. Takes effect on the next frame.
    ///
    /// # Errors
    ///
    /// Throws if `value` is not nested arrays of non-empty string arrays;
    /// the previous map stays in place.
    #[wasm_bindgen(setter)]
    pub fn set_map(&self, value: JsValue) -> Result<(), JsValue> {
        let json: String = js_sys::JSON::stringify(&value)
            .map_err(|e| ViewerError::Dom(describe_js(&e)))?
            .into();
        let map = TileMap::from_json(&json).map_err(ViewerError::from)?;
        self.shared.engine.borrow_mut().core.set_map(map);
        Ok(())
    }

    /// Hovered tile as `[x, y]`, or `[-1, -1]`.
    #[wasm_bindgen(js_name = hoveredTile)]
    pub fn hovered_tile(&self) -> Vec<i32> {
        let (x, y) = self.shared.engine.borrow().core.viewport.hovered_or_sentinel();
        vec![x, y]
    }

    /// Last clicked tile as `[x, y]`, or `[-1, -1]`.
    #[wasm_bindgen(js_name = selectedTile)]
    pub fn selected_tile(&self) -> Vec<i32> {
        let (x, y) = self.shared.engine.borrow().core.viewport.selected_or_sentinel();
        vec![x, y]
    }

    /// Pan offset as `[x, y]` in CSS pixels.
    pub fn offset(&self) -> Vec<f64> {
        let pan = self.shared.engine.borrow().core.pan();
        vec![pan.x, pan.y]
    }

    /// Move the pan offset to `(x, y)` CSS pixels.
    #[wasm_bindgen(js_name = setOffset)]
    pub fn set_offset(&self, x: f64, y: f64) {
        self.shared.engine.borrow_mut().core.set_pan(x, y);
    }

    /// Canvas position of a tile's centre, including the pan offset.
    #[wasm_bindgen(js_name = tileToScreen)]
    pub fn tile_to_screen(&self, x: i32, y: i32) -> Vec<f64> {
        let p = self.shared.engine.borrow().core.tile_center(TilePos::new(x, y));
        vec![p.x, p.y]
    }

    /// Tile under a canvas position, including the pan offset.
    #[wasm_bindgen(js_name = screenToTile)]
    pub fn screen_to_tile(&self, x: f64, y: f64) -> Vec<i32> {
        let tile = self.shared.engine.borrow().core.tile_at(Point::new(x, y));
        vec![tile.x, tile.y]
    }
}

// =============================================================
// Input plumbing
// =============================================================

/// Run a reducer step, then emit its actions outside the engine borrow.
fn dispatch(shared: &Shared, step: impl FnOnce(&mut EngineCore) -> Vec<Action>) {
    let actions = step(&mut shared.engine.borrow_mut().core);
    if actions.is_empty() {
        return;
    }
    let snapshot = shared.listeners.borrow().tile_clicked_snapshot();
    for action in actions {
        match action {
            Action::TileClicked(tile) => events::emit_tile_clicked(&snapshot, tile),
        }
    }
}

fn mouse_pointer(event: &MouseEvent) -> Pointer {
    Pointer::mouse(f64::from(event.offset_x()), f64::from(event.offset_y()))
}

/// Mouse position relative to `canvas`, for events not targeted at it.
fn client_pointer(event: &MouseEvent, canvas: &HtmlCanvasElement) -> Pointer {
    let rect = canvas.get_bounding_client_rect();
    Pointer::mouse(f64::from(event.client_x()) - rect.left(), f64::from(event.client_y()) - rect.top())
}

fn touch_pointers(list: &TouchList, canvas: &HtmlCanvasElement) -> Vec<Pointer> {
    let rect = canvas.get_bounding_client_rect();
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| Pointer::touch(f64::from(t.client_x()) - rect.left(), f64::from(t.client_y()) - rect.top()))
        .collect()
}

fn install_listeners(shared: &Rc<Shared>, canvas: &HtmlCanvasElement) -> Result<Vec<EventListener>, ViewerError> {
    let mut listeners = Vec::new();
    let active = EventListenerOptions::enable_prevent_default();

    // --- Mouse ---

    let s = Rc::clone(shared);
    listeners.push(EventListener::new(canvas, "mousedown", move |event: &Event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let button = Button::from_dom(event.button());
        dispatch(&s, |core| core.pointer_down(&[mouse_pointer(event)], button));
    }));

    let s = Rc::clone(shared);
    listeners.push(EventListener::new(canvas, "mousemove", move |event: &Event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let primary_held = event.buttons() & 1 != 0;
        dispatch(&s, |core| core.mouse_move(mouse_pointer(event), primary_held));
    }));

    listeners.push(EventListener::new_with_options(canvas, "contextmenu", active, |event: &Event| {
        event.prevent_default();
    }));

    // --- Touch ---

    let s = Rc::clone(shared);
    let c = canvas.clone();
    listeners.push(EventListener::new_with_options(canvas, "touchstart", active, move |event: &Event| {
        let Some(event) = event.dyn_ref::<TouchEvent>() else {
            return;
        };
        event.prevent_default();
        let pointers = touch_pointers(&event.touches(), &c);
        dispatch(&s, |core| core.pointer_down(&pointers, Button::Primary));
    }));

    let s = Rc::clone(shared);
    let c = canvas.clone();
    listeners.push(EventListener::new_with_options(canvas, "touchmove", active, move |event: &Event| {
        let Some(event) = event.dyn_ref::<TouchEvent>() else {
            return;
        };
        event.prevent_default();
        let pointers = touch_pointers(&event.touches(), &c);
        dispatch(&s, |core| core.pointer_move(&pointers));
    }));

    let s = Rc::clone(shared);
    let c = canvas.clone();
    listeners.push(EventListener::new_with_options(canvas, "touchend", active, move |event: &Event| {
        let Some(event) = event.dyn_ref::<TouchEvent>() else {
            return;
        };
        event.prevent_default();
        let remaining = touch_pointers(&event.touches(), &c);
        let released = touch_pointers(&event.changed_touches(), &c).first().copied();
        dispatch(&s, |core| core.touch_end(&remaining, released));
    }));

    let s = Rc::clone(shared);
    let c = canvas.clone();
    listeners.push(EventListener::new_with_options(canvas, "touchcancel", active, move |event: &Event| {
        let Some(event) = event.dyn_ref::<TouchEvent>() else {
            return;
        };
        let remaining = touch_pointers(&event.touches(), &c);
        dispatch(&s, |core| {
            if remaining.is_empty() {
                core.pointer_cancel();
                Vec::new()
            } else {
                core.touch_end(&remaining, None)
            }
        });
    }));

    // --- Window ---

    let window = web_sys::window().ok_or_else(|| ViewerError::Dom(String::from("no window")))?;
    // Releases anywhere on the page end the press.
    let s = Rc::clone(shared);
    let c = canvas.clone();
    listeners.push(EventListener::new(&window, "mouseup", move |event: &Event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let button = Button::from_dom(event.button());
        let release = client_pointer(event, &c);
        dispatch(&s, |core| core.pointer_up(Some(release), button));
    }));

    let s = Rc::clone(shared);
    listeners.push(EventListener::new(&window, "resize", move |_event: &Event| {
        s.engine.borrow_mut().core.request_resize();
    }));

    Ok(listeners)
}

// =============================================================
// Frame loop
// =============================================================

fn schedule_frame(shared: &Rc<Shared>) {
    let weak: Weak<Shared> = Rc::downgrade(shared);
    let handle = request_animation_frame(move |_timestamp| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        shared.frame.borrow_mut().take();
        run_frame(&shared);
        schedule_frame(&shared);
    });
    *shared.frame.borrow_mut() = Some(handle);
}

fn run_frame(shared: &Shared) {
    match shared.engine.borrow_mut().render() {
        Ok(stats) => log::trace!("frame: {stats:?}"),
        Err(err) => log::warn!("frame skipped: {err}"),
    }
}
