//! Viewer engine: the [`EngineCore`] input reducer and the canvas-owning [`Engine`].

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::assets::{AssetRegistry, AssetSource, load_image};
use crate::config::ViewerConfig;
use crate::error::{RenderError, ViewerError, describe_js};
use crate::input::{Button, InputState, Pointer, PointerKind};
use crate::iso::{IsoProjection, TilePos};
use crate::map::TileMap;
use crate::render::{self, CanvasPainter, FrameStats};
use crate::viewport::{Point, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A press and release landed within the click threshold over this tile.
    TileClicked(TilePos),
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub config: ViewerConfig,
    pub iso: IsoProjection,
    pub map: TileMap,
    pub viewport: Viewport,
    pub input: InputState,
    pub surface_width: f64,
    pub surface_height: f64,
    pub dpr: f64,
    resize_pending: bool,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            iso: config.projection(),
            config,
            map: TileMap::new(),
            viewport: Viewport::default(),
            input: InputState::default(),
            surface_width: 0.0,
            surface_height: 0.0,
            dpr: 1.0,
            resize_pending: false,
        }
    }

    // --- Data inputs ---

    /// Replace the map. Drawn from the next frame on.
    pub fn set_map(&mut self, map: TileMap) {
        log::info!("map set: {}x{} ({} tiles)", map.width(), map.height(), map.len());
        self.map = map;
    }

    // --- Surface ---

    /// Record the surface size in CSS pixels and the device pixel ratio.
    pub fn set_surface_size(&mut self, width: f64, height: f64, dpr: f64) {
        self.surface_width = width.max(0.0);
        self.surface_height = height.max(0.0);
        self.dpr = if dpr > 0.0 { dpr } else { 1.0 };
    }

    /// Flag that the container changed size. Repeated calls before the next
    /// frame collapse into one resize.
    pub fn request_resize(&mut self) {
        self.resize_pending = true;
    }

    /// Consume the pending resize flag.
    pub fn take_resize_request(&mut self) -> bool {
        std::mem::take(&mut self.resize_pending)
    }

    // --- Input events ---

    /// Mouse-down or touch-start. `pointers` holds every active pointer, primary first.
    pub fn pointer_down(&mut self, pointers: &[Pointer], button: Button) -> Vec<Action> {
        let Some(primary) = pointers.first().copied() else {
            return Vec::new();
        };
        self.refresh_hover(primary);
        if button != Button::Primary {
            return Vec::new();
        }

        // A further touch joins the gesture. A second mouse press means the
        // previous release was never seen, so it starts over.
        match &mut self.input {
            InputState::Pressed { pointers: current, .. } if primary.kind == PointerKind::Touch => {
                *current = pointers.to_vec();
            }
            _ => {
                self.input = InputState::Pressed {
                    pointers: pointers.to_vec(),
                    initial: pointers.to_vec(),
                };
            }
        }
        self.viewport.pressed = true;
        Vec::new()
    }

    /// Mouse-move or touch-move. Pans while pressed; always refreshes hover.
    pub fn pointer_move(&mut self, pointers: &[Pointer]) -> Vec<Action> {
        let Some(primary) = pointers.first().copied() else {
            return Vec::new();
        };
        if let InputState::Pressed { pointers: current, .. } = &mut self.input {
            if let Some(previous) = current.first() {
                self.viewport.pan_by(primary.x - previous.x, primary.y - previous.y);
            }
            *current = pointers.to_vec();
        }
        self.refresh_hover(primary);
        Vec::new()
    }

    /// Mouse-move carrying the DOM button mask. A press whose button is no
    /// longer held lost its release outside the page and is dropped before
    /// the move is applied.
    pub fn mouse_move(&mut self, pointer: Pointer, primary_held: bool) -> Vec<Action> {
        if !primary_held && self.input.is_pressed() {
            log::debug!("press dropped: primary button released elsewhere");
            self.end_press();
        }
        self.pointer_move(&[pointer])
    }

    /// Mouse-up, or touch-end with no touches left.
    ///
    /// `release` is where the primary pointer was let go; when the event
    /// carries no position the last known primary pointer is used.
    pub fn pointer_up(&mut self, release: Option<Pointer>, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            if let Some(pointer) = release {
                self.refresh_hover(pointer);
            }
            return Vec::new();
        }
        if !self.input.is_pressed() {
            return Vec::new();
        }
        if let Some(pointer) = release {
            self.pointer_move(&[pointer]);
        }

        let released = self.input.primary();
        let pressed_at = self.input.initial_primary();
        self.end_press();

        let (Some(released), Some(pressed_at)) = (released, pressed_at) else {
            return Vec::new();
        };
        let distance = pressed_at.point().distance_to(released.point());
        if distance <= self.config.click_threshold {
            let tile = self.tile_at(released.point());
            self.viewport.selected = Some(tile);
            log::debug!("click on tile ({}, {}) after {distance:.1}px", tile.x, tile.y);
            vec![Action::TileClicked(tile)]
        } else {
            log::debug!("drag of {distance:.1}px, pan now ({}, {})", self.viewport.pan_x, self.viewport.pan_y);
            Vec::new()
        }
    }

    /// Touch-end or touch-cancel. `remaining` are the touches still down,
    /// `released` the touch that lifted.
    pub fn touch_end(&mut self, remaining: &[Pointer], released: Option<Pointer>) -> Vec<Action> {
        if remaining.is_empty() {
            return self.pointer_up(released, Button::Primary);
        }
        // The primary may have changed; swap the list in without panning.
        if let InputState::Pressed { pointers, .. } = &mut self.input {
            *pointers = remaining.to_vec();
        }
        self.refresh_hover(remaining[0]);
        Vec::new()
    }

    /// Abandon the current press without a click.
    pub fn pointer_cancel(&mut self) {
        self.end_press();
    }

    fn end_press(&mut self) {
        self.input = InputState::Idle;
        self.viewport.pressed = false;
    }

    fn refresh_hover(&mut self, pointer: Pointer) {
        self.viewport.hovered = Some(self.tile_at(pointer.point()));
    }

    // --- Queries ---

    /// Tile under a screen-space point, taking the pan offset into account.
    #[must_use]
    pub fn tile_at(&self, screen: Point) -> TilePos {
        let map_pt = self.viewport.screen_to_map(screen);
        self.iso.screen_to_tile(map_pt.x, map_pt.y)
    }

    /// Screen-space centre of `tile`, taking the pan offset into account.
    #[must_use]
    pub fn tile_center(&self, tile: TilePos) -> Point {
        self.viewport.map_to_screen(self.iso.tile_to_screen(tile))
    }

    #[must_use]
    pub fn hovered(&self) -> Option<TilePos> {
        self.viewport.hovered
    }

    #[must_use]
    pub fn selected(&self) -> Option<TilePos> {
        self.viewport.selected
    }

    #[must_use]
    pub fn pan(&self) -> Point {
        Point::new(self.viewport.pan_x, self.viewport.pan_y)
    }

    /// Move the pan offset to an absolute position.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.viewport.pan_x = x;
        self.viewport.pan_y = y;
    }
}

/// The full viewer engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub core: EngineCore,
    pub assets: AssetRegistry<HtmlImageElement>,
}

impl Engine {
    /// Create an engine bound to `canvas` and size it to its container.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Dom`] if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, config: ViewerConfig) -> Result<Self, ViewerError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| ViewerError::Dom(describe_js(&e)))?
            .ok_or_else(|| ViewerError::Dom(String::from("canvas has no 2d context")))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ViewerError::Dom(String::from("2d context has unexpected type")))?;
        let mut engine = Self {
            canvas,
            ctx,
            core: EngineCore::new(config),
            assets: AssetRegistry::new(),
        };
        engine.fit_to_container();
        Ok(engine)
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    // --- Viewport ---

    /// Size the canvas backing store to its container's client area.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn fit_to_container(&mut self) {
        let (width, height) = match self.canvas.parent_element() {
            Some(parent) => (parent.client_width(), parent.client_height()),
            None => (self.canvas.client_width(), self.canvas.client_height()),
        };
        let width = f64::from(width.max(1));
        let height = f64::from(height.max(1));
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio()).max(1.0);

        self.canvas.set_width((width * dpr).round() as u32);
        self.canvas.set_height((height * dpr).round() as u32);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{width}px"));
        let _ = style.set_property("height", &format!("{height}px"));
        self.core.set_surface_size(width, height, dpr);
        log::debug!("surface resized to {width}x{height} @{dpr}x");
    }

    // --- Assets ---

    /// Start loading `source` and register it under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Dom`] if the image element cannot be created.
    pub fn register_image(&mut self, name: &str, source: &AssetSource) -> Result<(), ViewerError> {
        let image = load_image(source)?;
        self.assets.register(name, image);
        log::debug!("{} assets registered", self.assets.len());
        Ok(())
    }

    /// Forget the image under `name`. Returns whether one was registered.
    pub fn unregister_image(&mut self, name: &str) -> bool {
        self.assets.unregister(name).is_some()
    }

    // --- Render ---

    /// Run one frame: apply a pending resize, then draw the visible tiles.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the surface could not be cleared.
    pub fn render(&mut self) -> Result<FrameStats, RenderError> {
        if self.core.take_resize_request() {
            self.fit_to_container();
        }
        let mut painter = CanvasPainter::new(&self.ctx, self.core.dpr);
        render::draw_frame(&mut painter, &self.core, &self.assets)
    }
}
