//! Isometric projection between tile indices and map-space pixels.
//!
//! Tiles are diamonds `2 * hw` wide and `2 * hh` tall, where `hw` and `hh`
//! are the tile sprite's width and height halved and rounded up. Stepping
//! one tile along `x` moves right-and-down on screen, one tile along `y`
//! moves left-and-down.
//!
//! The projection knows nothing about panning: callers subtract the pan
//! offset before [`IsoProjection::screen_to_tile`] and add it after
//! [`IsoProjection::tile_to_screen`].

#[cfg(test)]
#[path = "iso_test.rs"]
mod iso_test;

use serde::{Deserialize, Serialize};

use crate::viewport::Point;

/// Index of one grid cell. Unbounded in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Fixed-size isometric projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsoProjection {
    tile_width: u32,
    tile_height: u32,
    hw: f64,
    hh: f64,
}

impl IsoProjection {
    /// Build a projection for tiles of the given sprite size.
    ///
    /// Zero dimensions are rejected earlier by config validation; passing
    /// them here makes `screen_to_tile` divide by zero.
    #[must_use]
    pub fn new(tile_width: u32, tile_height: u32) -> Self {
        Self {
            tile_width,
            tile_height,
            hw: f64::from(tile_width.div_ceil(2)),
            hh: f64::from(tile_height.div_ceil(2)),
        }
    }

    #[must_use]
    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    #[must_use]
    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// Half the tile width, rounded up.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.hw
    }

    /// Half the tile height, rounded up.
    #[must_use]
    pub fn half_height(&self) -> f64 {
        self.hh
    }

    /// Map-space centre of the diamond for `tile`.
    #[must_use]
    pub fn tile_to_screen(&self, tile: TilePos) -> Point {
        let tx = f64::from(tile.x);
        let ty = f64::from(tile.y);
        Point {
            x: (tx - ty) * self.hw,
            y: (tx + ty) * self.hh,
        }
    }

    /// Tile whose diamond contains the map-space point `(x, y)`.
    ///
    /// Inverse of [`Self::tile_to_screen`]. Points exactly on a diamond edge
    /// go to the tile further along that axis.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn screen_to_tile(&self, x: f64, y: f64) -> TilePos {
        let u = x / self.hw;
        let v = y / self.hh;
        let tx = ((u + v) / 2.0 + 0.5).floor();
        let ty = ((v - u) / 2.0 + 0.5).floor();
        TilePos {
            x: tx as i32,
            y: ty as i32,
        }
    }
}
