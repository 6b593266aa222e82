//! Rendering: draws the visible part of the map to a [`Painter`].
//!
//! [`draw_frame`] is the per-frame pass. It reads engine state and the asset
//! registry and produces draw calls; it never mutates application state.
//! [`CanvasPainter`] is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`].
//!
//! Missing or undecoded assets are skipped silently. A rejected draw is
//! logged and counted, and the frame carries on with the next layer. Only a
//! failed clear aborts the frame.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::assets::{AssetRegistry, Visual};
use crate::engine::EngineCore;
use crate::error::{RenderError, describe_js};
use crate::iso::IsoProjection;
use crate::viewport::Point;

/// Drawing surface seen by the frame pass.
pub trait Painter {
    type Visual: Visual;

    /// Clear the whole surface. Sizes are in CSS pixels.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the surface rejects the call.
    fn clear(&mut self, width: f64, height: f64) -> Result<(), RenderError>;

    /// Draw `visual` with its top-left corner at `(x, y)` in CSS pixels.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the surface rejects the call.
    fn draw(&mut self, name: &str, visual: &Self::Visual, x: f64, y: f64) -> Result<(), RenderError>;
}

/// Counters for one frame, for trace logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Tiles that passed culling.
    pub tiles_drawn: usize,
    /// Tiles skipped by culling.
    pub tiles_culled: usize,
    /// Layers and overlays actually drawn.
    pub layers_drawn: usize,
    /// Layers and overlays skipped because their asset was not ready.
    pub layers_skipped: usize,
    /// Layers and overlays the painter rejected.
    pub layers_failed: usize,
}

/// Draw one frame: clear, then every visible tile's layers bottom to top,
/// with the hover overlay directly above the hovered tile's base layer.
///
/// # Errors
///
/// Returns `Err` only if clearing the surface fails.
pub fn draw_frame<P: Painter>(
    painter: &mut P,
    core: &EngineCore,
    assets: &AssetRegistry<P::Visual>,
) -> Result<FrameStats, RenderError> {
    let mut stats = FrameStats::default();
    painter.clear(core.surface_width, core.surface_height)?;

    let overlay = if core.viewport.pressed {
        core.config.selection_down_asset.as_str()
    } else {
        core.config.selection_asset.as_str()
    };

    for (pos, stack) in core.map.iter() {
        let center = core.tile_center(pos);
        if !is_visible(&core.iso, center, core.surface_width, core.surface_height) {
            stats.tiles_culled += 1;
            continue;
        }
        stats.tiles_drawn += 1;

        let hovered = core.viewport.hovered == Some(pos);
        for (index, name) in stack.layers().enumerate() {
            draw_layer(painter, assets, &core.iso, name, center, &mut stats);
            if index == 0 && hovered {
                draw_layer(painter, assets, &core.iso, overlay, center, &mut stats);
            }
        }
    }

    Ok(stats)
}

/// Whether a tile centred at `center` (screen space) can touch the surface.
///
/// The tile's diamond bounds are inflated by one tile size on every side so
/// sprites taller or wider than the diamond are not clipped early.
#[must_use]
pub fn is_visible(iso: &IsoProjection, center: Point, width: f64, height: f64) -> bool {
    let reach_x = iso.half_width() + f64::from(iso.tile_width());
    let reach_y = iso.half_height() + f64::from(iso.tile_height());
    center.x + reach_x > 0.0 && center.x - reach_x < width && center.y + reach_y > 0.0 && center.y - reach_y < height
}

/// Top-left corner for a `w` x `h` sprite on the tile centred at `center`.
///
/// Sprites sit with their bottom-centre on the diamond's bottom vertex, so
/// tall sprites grow upwards.
#[must_use]
pub fn sprite_origin(iso: &IsoProjection, center: Point, w: u32, h: u32) -> Point {
    Point::new(
        center.x - f64::from(w) / 2.0,
        center.y + iso.half_height() - f64::from(h),
    )
}

fn draw_layer<P: Painter>(
    painter: &mut P,
    assets: &AssetRegistry<P::Visual>,
    iso: &IsoProjection,
    name: &str,
    center: Point,
    stats: &mut FrameStats,
) {
    let Some((visual, w, h)) = assets.get_ready(name) else {
        stats.layers_skipped += 1;
        return;
    };
    let origin = sprite_origin(iso, center, w, h);
    match painter.draw(name, visual, origin.x, origin.y) {
        Ok(()) => stats.layers_drawn += 1,
        Err(err) => {
            log::warn!("draw of '{name}' failed: {err}");
            stats.layers_failed += 1;
        }
    }
}

/// [`Painter`] over a browser 2D context.
pub struct CanvasPainter<'a> {
    ctx: &'a CanvasRenderingContext2d,
    dpr: f64,
}

impl<'a> CanvasPainter<'a> {
    #[must_use]
    pub fn new(ctx: &'a CanvasRenderingContext2d, dpr: f64) -> Self {
        Self { ctx, dpr }
    }
}

impl Painter for CanvasPainter<'_> {
    type Visual = HtmlImageElement;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), RenderError> {
        self.ctx
            .set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)
            .map_err(|e| RenderError::Canvas(describe_js(&e)))?;
        self.ctx.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn draw(&mut self, _name: &str, visual: &HtmlImageElement, x: f64, y: f64) -> Result<(), RenderError> {
        self.ctx
            .draw_image_with_html_image_element(visual, x, y)
            .map_err(|e| RenderError::Canvas(describe_js(&e)))
    }
}
