//! Delivery-integrated strategies.
//!
//! Both strategies here wrap the byte-producing paths and route the result
//! through the best delivery channel the snapshot offers. A failed
//! delivery does not fail the generation — the bytes are still in the
//! result — but it is surfaced in the result's error field.

use super::raster_canvas::RASTER_SCALE;
use super::text_layout::generate_text_bytes;
use super::{GenerationContext, GeneratorStrategy, StrategyFuture};
use crate::delivery::deliver;
use crate::render::render_raster_document;
use crate::request::DocumentRequest;
use crate::types::{GenerationResult, StrategyId};
use log::{info, warn};

fn deliver_bytes(
    id: StrategyId,
    bytes: Vec<u8>,
    request: &DocumentRequest,
    ctx: &GenerationContext,
) -> GenerationResult {
    request.report_progress(92, &ctx.label("progress.deliver"));
    let mut result = GenerationResult::with_bytes(id, bytes);
    match deliver(
        result.bytes.as_deref().unwrap_or_default(),
        &ctx.filename,
        &ctx.capabilities,
        ctx.platform.as_ref(),
    ) {
        Ok(method) => {
            info!("delivered via {method:?}");
            result.delivered_via = Some(method);
        }
        Err(e) => {
            warn!("delivery failed after generation: {e}");
            result.error = Some(format!("generated but not delivered: {e}"));
        }
    }
    result
}

/// Text-layout output routed through native save/share when available,
/// falling back to the plain download sink.
pub struct PlatformNativeStrategy;

impl GeneratorStrategy for PlatformNativeStrategy {
    fn id(&self) -> StrategyId {
        StrategyId::PlatformNative
    }

    fn generate<'a>(
        &'a self,
        request: &'a DocumentRequest,
        ctx: &'a GenerationContext,
    ) -> StrategyFuture<'a> {
        Box::pin(async move {
            match generate_text_bytes(request, ctx).await {
                Ok(bytes) => deliver_bytes(self.id(), bytes, request, ctx),
                Err(message) => GenerationResult::failure(self.id(), message),
            }
        })
    }
}

/// Chooses the best inner approach for the snapshot, then delivers.
///
/// A rasterizing surface plus markup favors the pixel-accurate path;
/// anything else produces vector text.
pub struct CapabilityOptimizedStrategy;

impl GeneratorStrategy for CapabilityOptimizedStrategy {
    fn id(&self) -> StrategyId {
        StrategyId::CapabilityOptimized
    }

    fn generate<'a>(
        &'a self,
        request: &'a DocumentRequest,
        ctx: &'a GenerationContext,
    ) -> StrategyFuture<'a> {
        Box::pin(async move {
            let raster_path = ctx.capabilities.canvas_rasterization
                && request.rendered_markup.is_some();

            let bytes = if raster_path {
                request.report_progress(40, &ctx.label("progress.raster"));
                let markup = request.rendered_markup.as_deref().unwrap_or_default();
                ctx.platform
                    .rasterizer()
                    .ok_or_else(|| "no drawing surface available".to_string())
                    .and_then(|r| {
                        r.rasterize(markup, RASTER_SCALE)
                            .map_err(|e| format!("rasterization failed: {e}"))
                    })
                    .and_then(|pages| {
                        render_raster_document(&pages).map_err(|e| e.to_string())
                    })
            } else {
                generate_text_bytes(request, ctx).await
            };

            match bytes {
                Ok(bytes) => deliver_bytes(self.id(), bytes, request, ctx),
                Err(message) => GenerationResult::failure(self.id(), message),
            }
        })
    }
}
