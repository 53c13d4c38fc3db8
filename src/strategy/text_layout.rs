//! Vector text layout strategy and the shared layout/render path reused by
//! the reliable-font and platform-native strategies.

use super::{GenerationContext, GeneratorStrategy, StrategyFuture};
use crate::fonts::{FontAsset, ScriptClass, TextMeasure};
use crate::layout::compose_document;
use crate::render::render_text_document;
use crate::request::{ChecklistSnapshot, DocumentRequest};
use crate::types::{GenerationResult, StrategyId};
use log::debug;
use std::sync::Arc;

const BODY_SIZE: f32 = 11.0;

/// Dominant script across everything that will be printed.
pub(super) fn document_script(snapshot: &ChecklistSnapshot) -> ScriptClass {
    let mut sample = snapshot.title.clone();
    for item in &snapshot.items {
        sample.push(' ');
        sample.push_str(&item.text);
        if let Some(note) = &item.note {
            sample.push(' ');
            sample.push_str(note);
        }
    }
    ScriptClass::dominant(&sample)
}

/// Layout + render with the given (possibly absent) embedded face.
pub(super) fn render_snapshot(
    request: &DocumentRequest,
    ctx: &GenerationContext,
    snapshot: &ChecklistSnapshot,
    script: ScriptClass,
    asset: Option<Arc<FontAsset>>,
) -> Result<Vec<u8>, String> {
    request.report_progress(55, &ctx.label("progress.layout"));
    let size = crate::fonts::FontLibrary::recommended_font_size(script, BODY_SIZE);
    let measure = TextMeasure::new(asset.clone(), size);
    let pages = compose_document(snapshot, &request.options, script, &measure, &ctx.translate);

    request.report_progress(80, &ctx.label("progress.render"));
    render_text_document(&pages, &snapshot.title, asset.as_deref()).map_err(|e| e.to_string())
}

/// Full text pipeline: resolve fonts, lay out, render.
pub(super) async fn generate_text_bytes(
    request: &DocumentRequest,
    ctx: &GenerationContext,
) -> Result<Vec<u8>, String> {
    request.report_progress(30, &ctx.label("progress.fonts"));
    let script = document_script(&request.snapshot);
    let asset = ctx.fonts.load_for_script(script).await;
    if asset.is_none() {
        debug!("no font asset for {script:?}; using the built-in base font");
    }
    render_snapshot(request, ctx, &request.snapshot, script, asset)
}

/// Pure vector text placement. Small, searchable output; styling is
/// limited to the engine's fixed typography.
pub struct TextLayoutStrategy;

impl GeneratorStrategy for TextLayoutStrategy {
    fn id(&self) -> StrategyId {
        StrategyId::TextLayout
    }

    fn generate<'a>(
        &'a self,
        request: &'a DocumentRequest,
        ctx: &'a GenerationContext,
    ) -> StrategyFuture<'a> {
        Box::pin(async move {
            match generate_text_bytes(request, ctx).await {
                Ok(bytes) => GenerationResult::with_bytes(self.id(), bytes),
                Err(message) => GenerationResult::failure(self.id(), message),
            }
        })
    }
}
