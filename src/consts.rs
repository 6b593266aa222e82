//! Shared numeric and naming constants for the viewer.

// ── Tiles ───────────────────────────────────────────────────────

/// Default tile sprite width in pixels.
pub const DEFAULT_TILE_WIDTH: u32 = 132;

/// Default tile sprite height in pixels.
pub const DEFAULT_TILE_HEIGHT: u32 = 65;

// ── Input ───────────────────────────────────────────────────────

/// Maximum press-to-release distance, in CSS pixels, still treated as a click.
pub const CLICK_THRESHOLD_PX: f64 = 10.0;

/// Tile index reported to JavaScript when nothing is hovered or selected.
pub const NO_TILE_SENTINEL: i32 = -1;

// ── Overlay assets ──────────────────────────────────────────────

/// Asset drawn over the hovered tile while no pointer is pressed.
pub const SELECTION_ASSET: &str = "selection";

/// Asset drawn over the hovered tile while a pointer is pressed.
pub const SELECTION_DOWN_ASSET: &str = "selection-down";

// ── Events ──────────────────────────────────────────────────────

/// Event name for tile clicks on the JavaScript surface.
pub const TILE_CLICKED_EVENT: &str = "tileClicked";
