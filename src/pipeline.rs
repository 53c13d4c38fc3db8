// src/pipeline.rs
//! The orchestrator.
//!
//! [`DocumentPipeline::generate`] selects an initial strategy from the
//! capability snapshot (or the request's explicit mode), executes it, and
//! on failure walks the fixed-priority fallback chain, skipping anything
//! already attempted. It always resolves with a [`GenerationResult`]; on
//! total failure the result aggregates every attempted strategy's message.

use crate::capability::{select_strategy, CapabilityDetector, CapabilitySnapshot};
use crate::delivery::{deliver, DeliveryError};
use crate::error::PipelineError;
use crate::fonts::FontLibrary;
use crate::platform::{HeadlessPlatform, PlatformBridge};
use crate::request::{DocumentRequest, FilenameSanitizer};
use crate::resource::{InMemoryResourceProvider, ResourceProvider};
use crate::strategy::{
    GenerationContext, GeneratorStrategy, StrategyRegistry, FALLBACK_CHAIN,
};
use crate::types::{DeliveryMethod, GenerationResult, StrategyId};
use crate::Translator;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Instant;

/// Observable orchestrator state, logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PipelineState {
    Idle,
    Generating(StrategyId),
    FallbackGenerating(StrategyId),
    Success(StrategyId),
    AllFailed,
}

fn compose_filename(stem: &str) -> String {
    let stem = if stem.is_empty() { "checklist" } else { stem };
    format!("{stem}-{}.pdf", chrono::Local::now().format("%Y-%m-%d"))
}

/// Artifact filename with the default sanitizer: sanitized title plus the
/// generation date.
pub fn build_filename(title: &str) -> String {
    compose_filename(&slug::slugify(title))
}

/// The main generation pipeline. Construct through [`PipelineBuilder`].
pub struct DocumentPipeline {
    registry: StrategyRegistry,
    detector: CapabilityDetector,
    fonts: Arc<FontLibrary>,
    platform: Arc<dyn PlatformBridge>,
    translate: Translator,
    sanitize: FilenameSanitizer,
}

impl std::fmt::Debug for DocumentPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentPipeline").finish_non_exhaustive()
    }
}

impl DocumentPipeline {
    /// Current capability snapshot.
    pub fn capabilities(&self) -> CapabilitySnapshot {
        self.detector.snapshot()
    }

    /// Re-probe the environment, replacing the snapshot wholesale.
    pub fn refresh_capabilities(&self) {
        self.detector.refresh();
    }

    /// Capability detector, exposed for feature-level scoring.
    pub fn detector(&self) -> &CapabilityDetector {
        &self.detector
    }

    fn filename_for(&self, title: &str) -> String {
        compose_filename(&(self.sanitize)(title))
    }

    fn context(&self, capabilities: CapabilitySnapshot, filename: String) -> GenerationContext {
        GenerationContext {
            fonts: self.fonts.clone(),
            platform: self.platform.clone(),
            capabilities,
            translate: self.translate.clone(),
            filename,
        }
    }

    /// Generate a document for the request.
    ///
    /// Never returns an error and never panics through: the result's
    /// `success` flag and `error` field carry the outcome.
    pub async fn generate(&self, request: DocumentRequest) -> GenerationResult {
        let started = Instant::now();
        let mut state = PipelineState::Idle;
        debug!("pipeline state: {state:?}");

        request.report_progress(2, &(self.translate)("progress.detect"));
        let capabilities = self.detector.snapshot();
        let initial = select_strategy(&capabilities, request.options.mode);
        let filename = self.filename_for(&request.snapshot.title);
        let ctx = self.context(capabilities, filename.clone());

        let mut attempted: Vec<StrategyId> = Vec::new();
        let mut failures: Vec<String> = Vec::new();
        let mut last_attempt = initial;

        let candidates = std::iter::once(initial).chain(FALLBACK_CHAIN.iter().copied());
        for id in candidates {
            if attempted.contains(&id) {
                continue;
            }
            let Some(strategy) = self.registry.get(id) else {
                debug!("strategy {id} is not registered; skipping");
                continue;
            };

            state = if attempted.is_empty() {
                PipelineState::Generating(id)
            } else {
                PipelineState::FallbackGenerating(id)
            };
            debug!("pipeline state: {state:?}");
            info!("generating with strategy {id}");

            attempted.push(id);
            last_attempt = id;

            let mut result = strategy.generate(&request, &ctx).await;
            if result.success {
                state = PipelineState::Success(id);
                debug!("pipeline state: {state:?}");

                result.strategy_used = id;
                result.duration_ms = started.elapsed().as_millis() as u64;
                result.filename = filename;
                request.report_progress(100, &(self.translate)("progress.done"));
                info!(
                    "generation complete via {id} in {}ms ({} attempt(s))",
                    result.duration_ms,
                    attempted.len()
                );
                return result;
            }

            let message = result
                .error
                .unwrap_or_else(|| "unspecified failure".to_string());
            warn!("strategy {id} failed: {message}");
            failures.push(format!("{id}: {message}"));
        }

        state = PipelineState::AllFailed;
        debug!("pipeline state: {state:?}");
        warn!(
            "all {} attempted strategies failed for '{}'",
            attempted.len(),
            request.snapshot.title
        );
        request.report_progress(100, &(self.translate)("progress.failed"));

        let message = if failures.is_empty() {
            "no registered strategy could be attempted".to_string()
        } else {
            failures.join("; ")
        };
        let mut result = GenerationResult::failure(last_attempt, message);
        result.duration_ms = started.elapsed().as_millis() as u64;
        result.filename = filename;
        result
    }

    /// Blocking convenience wrapper around [`generate`](Self::generate),
    /// for callers without a runtime.
    pub fn generate_blocking(&self, request: DocumentRequest) -> GenerationResult {
        let fallback_id = request.options.mode.unwrap_or(StrategyId::TextLayout);
        match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime.block_on(self.generate(request)),
            Err(e) => GenerationResult::failure(fallback_id, format!("runtime setup failed: {e}")),
        }
    }

    /// Deliver an already generated result through the best channel the
    /// current snapshot offers.
    pub fn deliver(&self, result: &GenerationResult) -> Result<DeliveryMethod, DeliveryError> {
        let bytes = result.bytes.as_deref().unwrap_or_default();
        deliver(
            bytes,
            &result.filename,
            &self.detector.snapshot(),
            self.platform.as_ref(),
        )
    }
}

/// Builder wiring the injected collaborators into a pipeline.
pub struct PipelineBuilder {
    platform: Option<Arc<dyn PlatformBridge>>,
    provider: Option<Arc<dyn ResourceProvider>>,
    translator: Option<Translator>,
    sanitizer: Option<FilenameSanitizer>,
    extra_strategies: Vec<Box<dyn GeneratorStrategy>>,
    default_strategies: bool,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        PipelineBuilder {
            platform: None,
            provider: None,
            translator: None,
            sanitizer: None,
            extra_strategies: Vec::new(),
            default_strategies: true,
        }
    }

    pub fn with_platform(mut self, platform: Arc<dyn PlatformBridge>) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn with_resource_provider(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_translator(mut self, translator: Translator) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_filename_sanitizer(mut self, sanitizer: FilenameSanitizer) -> Self {
        self.sanitizer = Some(sanitizer);
        self
    }

    /// Register an additional strategy; replaces a built-in with the same
    /// id.
    pub fn with_strategy(mut self, strategy: Box<dyn GeneratorStrategy>) -> Self {
        self.extra_strategies.push(strategy);
        self
    }

    /// Start from an empty registry instead of the built-in set.
    pub fn without_default_strategies(mut self) -> Self {
        self.default_strategies = false;
        self
    }

    pub fn build(self) -> Result<DocumentPipeline, PipelineError> {
        let mut registry = if self.default_strategies {
            StrategyRegistry::with_defaults()
        } else {
            StrategyRegistry::new()
        };
        for strategy in self.extra_strategies {
            registry.register(strategy);
        }
        if registry.is_empty() {
            return Err(PipelineError::Config(
                "no generation strategies registered".to_string(),
            ));
        }

        let platform: Arc<dyn PlatformBridge> = self
            .platform
            .unwrap_or_else(|| Arc::new(HeadlessPlatform::default()));
        let provider: Arc<dyn ResourceProvider> = self
            .provider
            .unwrap_or_else(|| Arc::new(InMemoryResourceProvider::new()));
        let translate = self
            .translator
            .unwrap_or_else(|| Arc::new(crate::default_labels));
        let sanitize = self
            .sanitizer
            .unwrap_or_else(|| Arc::new(|title: &str| slug::slugify(title)));

        Ok(DocumentPipeline {
            registry,
            detector: CapabilityDetector::new(platform.clone()),
            fonts: Arc::new(FontLibrary::new(provider)),
            platform,
            translate,
            sanitize,
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
