//! Viewport state: pan offset plus the hovered, selected and pressed flags.
//!
//! Written only by the [`crate::engine::EngineCore`] reducer and read by the
//! render pass and the host queries. Screen space is canvas-local CSS pixels;
//! map space is screen space with the pan removed.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::consts::NO_TILE_SENTINEL;
use crate::iso::TilePos;

/// A point in either screen or map space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// View state for the tile map.
///
/// `pan_x` / `pan_y` are in CSS pixels and translate the whole grid.
/// Written only by the input reducer in [`crate::engine::EngineCore`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Viewport {
    pub pan_x: f64,
    pub pan_y: f64,
    /// Tile under the primary pointer, if any.
    pub hovered: Option<TilePos>,
    /// Tile of the most recent click, if any.
    pub selected: Option<TilePos>,
    /// A primary pointer is currently held down.
    pub pressed: bool,
}

impl Viewport {
    /// Convert a screen-space point (CSS pixels) to map space.
    #[must_use]
    pub fn screen_to_map(&self, screen: Point) -> Point {
        Point {
            x: screen.x - self.pan_x,
            y: screen.y - self.pan_y,
        }
    }

    /// Convert a map-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn map_to_screen(&self, map: Point) -> Point {
        Point {
            x: map.x + self.pan_x,
            y: map.y + self.pan_y,
        }
    }

    /// Shift the pan offset by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Hovered tile as indices, with `(-1, -1)` standing for "none".
    #[must_use]
    pub fn hovered_or_sentinel(&self) -> (i32, i32) {
        tile_or_sentinel(self.hovered)
    }

    /// Selected tile as indices, with `(-1, -1)` standing for "none".
    #[must_use]
    pub fn selected_or_sentinel(&self) -> (i32, i32) {
        tile_or_sentinel(self.selected)
    }
}

fn tile_or_sentinel(tile: Option<TilePos>) -> (i32, i32) {
    tile.map_or((NO_TILE_SENTINEL, NO_TILE_SENTINEL), |t| (t.x, t.y))
}
