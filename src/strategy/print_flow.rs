//! Print-flow strategy: hand the pre-rendered markup to the platform's
//! native print/export dialog.
//!
//! The document never materializes as bytes in this process. Completion is
//! inferred by polling surface dismissal against a fixed wall-clock
//! budget; a dismissed or timed-out surface is reported as a completed
//! external flow because no bridge can tell "printed" from "cancelled".

use super::{GenerationContext, GeneratorStrategy, StrategyFuture};
use crate::request::DocumentRequest;
use crate::types::{GenerationResult, StrategyId};
use log::{debug, warn};
use std::time::Duration;
use tokio::time::Instant;

/// Wall-clock budget for the user-driven dialog.
pub const PRINT_FLOW_TIMEOUT: Duration = Duration::from_secs(30);
const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct PrintFlowStrategy;

impl GeneratorStrategy for PrintFlowStrategy {
    fn id(&self) -> StrategyId {
        StrategyId::PrintFlow
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
            let Some(surface) = ctx.platform.print_surface() else {
                return GenerationResult::failure(self.id(), "no print surface available");
            };

            request.report_progress(40, &ctx.label("progress.print"));
            if let Err(e) = surface.present(markup) {
                return GenerationResult::failure(
                    self.id(),
                    format!("print surface rejected markup: {e}"),
                );
            }

            let deadline = Instant::now() + PRINT_FLOW_TIMEOUT;
            loop {
                if surface.is_dismissed() {
                    debug!("print surface dismissed; treating flow as complete");
                    break;
                }
                if Instant::now() >= deadline {
                    warn!(
                        "print surface still open after {PRINT_FLOW_TIMEOUT:?}; \
                         treating flow as complete"
                    );
                    break;
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }

            GenerationResult::external(self.id())
        })
    }
}
