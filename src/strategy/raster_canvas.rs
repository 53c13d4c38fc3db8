//! Raster strategy: pre-rendered markup is drawn by the platform surface
//! into upscaled bitmaps and each bitmap becomes one full-page image.
//! Pixel-accurate to the on-screen rendering, but the output carries no
//! extractable text and is considerably larger than the vector paths.

use super::{GenerationContext, GeneratorStrategy, StrategyFuture};
use crate::render::render_raster_document;
use crate::request::DocumentRequest;
use crate::types::{GenerationResult, StrategyId};
use log::debug;

/// Upscale factor applied when rasterizing, to keep print output crisp.
pub const RASTER_SCALE: f32 = 2.0;

pub struct RasterCanvasStrategy;

impl GeneratorStrategy for RasterCanvasStrategy {
    fn id(&self) -> StrategyId {
        StrategyId::RasterCanvas
    }

    fn generate<'a>(
        &'a self,
        request: &'a DocumentRequest,
        ctx: &'a GenerationContext,
    ) -> StrategyFuture<'a> {
        Box::pin(async move {
            let Some(markup) = request.rendered_markup.as_deref() else {
                return GenerationResult::failure(
                    self.id(),
                    "no pre-rendered markup in the request",
                );
            };
            let Some(rasterizer) = ctx.platform.rasterizer() else {
                return GenerationResult::failure(self.id(), "no drawing surface available");
            };
            if !rasterizer.can_export_bitmap() {
                return GenerationResult::failure(
                    self.id(),
                    "drawing surface cannot export bitmaps",
                );
            }

            request.report_progress(40, &ctx.label("progress.raster"));
            let pages = match rasterizer.rasterize(markup, RASTER_SCALE) {
                Ok(pages) => pages,
                Err(e) => {
                    return GenerationResult::failure(
                        self.id(),
                        format!("rasterization failed: {e}"),
                    )
                }
            };
            debug!("rasterized {} page(s) at {RASTER_SCALE}x", pages.len());

            request.report_progress(80, &ctx.label("progress.render"));
            match render_raster_document(&pages) {
                Ok(bytes) => GenerationResult::with_bytes(self.id(), bytes),
                Err(e) => GenerationResult::failure(self.id(), e.to_string()),
            }
        })
    }
}
