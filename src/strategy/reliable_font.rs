//! Text layout with a guaranteed-legible font path.
//!
//! Behaves like the text-layout strategy while a multi-script face can be
//! embedded. When it cannot, instead of risking corrupted glyphs the
//! snapshot's non-ASCII text is sanitized to placeholders and rendered
//! with the built-in base font — legible everywhere, at the cost of
//! original script fidelity.

use super::text_layout::{document_script, render_snapshot};
use super::{GenerationContext, GeneratorStrategy, StrategyFuture};
use crate::fonts::{sanitize_to_ascii, ScriptClass};
use crate::request::{ChecklistSnapshot, DocumentRequest};
use crate::types::{GenerationResult, StrategyId};
use log::warn;

fn sanitize_snapshot(snapshot: &ChecklistSnapshot) -> ChecklistSnapshot {
    let mut sanitized = snapshot.clone();
    sanitized.title = sanitize_to_ascii(&sanitized.title);
    for item in &mut sanitized.items {
        item.category = sanitize_to_ascii(&item.category);
        item.text = sanitize_to_ascii(&item.text);
        item.note = item.note.as_deref().map(sanitize_to_ascii);
        item.guide = item.guide.as_deref().map(sanitize_to_ascii);
    }
    sanitized
}

pub struct ReliableFontStrategy;

impl GeneratorStrategy for ReliableFontStrategy {
    fn id(&self) -> StrategyId {
        StrategyId::ReliableFont
    }

    fn generate<'a>(
        &'a self,
        request: &'a DocumentRequest,
        ctx: &'a GenerationContext,
    ) -> StrategyFuture<'a> {
        Box::pin(async move {
            request.report_progress(30, &ctx.label("progress.fonts"));
            let script = document_script(&request.snapshot);
            let asset = ctx.fonts.load_for_script(script).await;

            let rendered = match asset {
                Some(asset) => {
                    render_snapshot(request, ctx, &request.snapshot, script, Some(asset))
                }
                None => {
                    if script != ScriptClass::Latin {
                        warn!(
                            "no embeddable face for {script:?}; sanitizing to the base font"
                        );
                    }
                    let sanitized = sanitize_snapshot(&request.snapshot);
                    render_snapshot(request, ctx, &sanitized, ScriptClass::Latin, None)
                }
            };

            match rendered {
                Ok(bytes) => GenerationResult::with_bytes(self.id(), bytes),
                Err(message) => GenerationResult::failure(self.id(), message),
            }
        })
    }
}
