//! Generation strategies.
//!
//! Each strategy is an independent implementation of the same contract:
//! consume a [`DocumentRequest`], produce a [`GenerationResult`], never
//! panic through and never return an `Err` — failures become failed
//! results that the orchestrator's fallback walk consumes. Strategies are
//! looked up by [`StrategyId`] in a [`StrategyRegistry`] populated at
//! pipeline construction, so adding one never touches the orchestrator.

mod platform_native;
mod print_flow;
mod raster_canvas;
mod reliable_font;
mod text_layout;

pub use platform_native::{CapabilityOptimizedStrategy, PlatformNativeStrategy};
pub use print_flow::PrintFlowStrategy;
pub use raster_canvas::RasterCanvasStrategy;
pub use reliable_font::ReliableFontStrategy;
pub use text_layout::TextLayoutStrategy;

use crate::capability::CapabilitySnapshot;
use crate::fonts::FontLibrary;
use crate::platform::PlatformBridge;
use crate::request::DocumentRequest;
use crate::types::{GenerationResult, StrategyId};
use crate::Translator;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Fixed-priority fallback chain walked after a failed attempt. The
/// initially selected strategy is skipped when it reappears here.
pub const FALLBACK_CHAIN: [StrategyId; 4] = [
    StrategyId::PrintFlow,
    StrategyId::ReliableFont,
    StrategyId::TextLayout,
    StrategyId::CapabilityOptimized,
];

/// Shared, read-only resources for one generation run.
#[derive(Clone)]
pub struct GenerationContext {
    pub fonts: Arc<FontLibrary>,
    pub platform: Arc<dyn PlatformBridge>,
    pub capabilities: CapabilitySnapshot,
    pub translate: Translator,
    /// Artifact filename for this run, already sanitized and dated.
    pub filename: String,
}

impl GenerationContext {
    pub fn label(&self, key: &str) -> String {
        (self.translate)(key)
    }
}

pub type StrategyFuture<'a> = Pin<Box<dyn Future<Output = GenerationResult> + Send + 'a>>;

/// Contract shared by every generator.
pub trait GeneratorStrategy: Send + Sync {
    fn id(&self) -> StrategyId;

    /// Produce a result for the request. Implementations convert every
    /// internal error into a failed result; callers can rely on this
    /// future resolving.
    fn generate<'a>(
        &'a self,
        request: &'a DocumentRequest,
        ctx: &'a GenerationContext,
    ) -> StrategyFuture<'a>;
}

/// Registry of tagged strategy implementations.
#[derive(Default)]
pub struct StrategyRegistry {
    entries: Vec<Box<dyn GeneratorStrategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All built-in strategies under their canonical ids.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(PrintFlowStrategy));
        registry.register(Box::new(TextLayoutStrategy));
        registry.register(Box::new(ReliableFontStrategy));
        registry.register(Box::new(RasterCanvasStrategy));
        registry.register(Box::new(PlatformNativeStrategy));
        registry.register(Box::new(CapabilityOptimizedStrategy));
        registry
    }

    /// Register a strategy; a later registration under the same id wins.
    pub fn register(&mut self, strategy: Box<dyn GeneratorStrategy>) {
        let id = strategy.id();
        self.entries.retain(|existing| existing.id() != id);
        self.entries.push(strategy);
    }

    pub fn get(&self, id: StrategyId) -> Option<&dyn GeneratorStrategy> {
        self.entries
            .iter()
            .find(|s| s.id() == id)
            .map(|s| s.as_ref())
    }

    pub fn contains(&self, id: StrategyId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
