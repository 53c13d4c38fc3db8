//! # checkpress
//!
//! Capability-aware checklist document engine: turns a read-only checklist
//! snapshot into a paginated, printable PDF byte stream.
//!
//! - **capability**: probes the injected platform bridge and scores it
//! - **fonts**: per-script font assets, wrapping, measurement
//! - **layout**: block composition and pagination
//! - **render**: lopdf document assembly (vector text and raster pages)
//! - **strategy**: six interchangeable generators behind one registry
//! - **pipeline**: orchestrator with an ordered fallback chain
//! - **delivery**: save dialog / share sheet / download routing
//!
//! ## Design principle
//!
//! Everything platform-specific arrives through traits
//! ([`PlatformBridge`], [`ResourceProvider`], the translator function);
//! the engine itself never opens dialogs or touches the network. Failures
//! below the orchestrator are data, not panics: [`DocumentPipeline::generate`]
//! always resolves with a [`GenerationResult`].
//!
//! ```no_run
//! use checkpress::{ChecklistSnapshot, DocumentRequest, PipelineBuilder};
//!
//! let snapshot: ChecklistSnapshot = serde_json::from_str("...").unwrap();
//! let pipeline = PipelineBuilder::new().build().unwrap();
//! let result = pipeline.generate_blocking(DocumentRequest::new(snapshot));
//! assert!(result.success);
//! ```

pub mod capability;
pub mod delivery;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod pipeline;
pub mod platform;
pub mod render;
pub mod request;
pub mod resource;
pub mod strategy;
pub mod types;

pub use capability::{
    score_feature_level, select_strategy, CapabilityDetector, CapabilitySnapshot,
};
pub use error::PipelineError;
pub use pipeline::{build_filename, DocumentPipeline, PipelineBuilder};
pub use platform::{HeadlessPlatform, InMemoryPlatform, PlatformBridge};
pub use request::{
    ChecklistItem, ChecklistSnapshot, DocumentOptions, DocumentRequest, FilenameSanitizer,
    ItemState, ProgressFn, Translator,
};
pub use resource::{
    FilesystemResourceProvider, InMemoryResourceProvider, ResourceProvider,
};
pub use types::{DeliveryMethod, FeatureLevel, GenerationResult, StrategyId};

/// Built-in English labels for the handful of fixed strings the engine
/// prints. Real applications inject their own translator; this default
/// keeps demos and tests readable.
pub fn default_labels(key: &str) -> String {
    match key {
        "doc.untitled" => "Untitled checklist",
        "doc.progress" => "{done} of {total} items completed",
        "item.note" => "Note",
        "item.guide" => "Guide",
        "summary.title" => "Summary",
        "summary.completed" => "Completed: {count}",
        "summary.skipped" => "Skipped: {count}",
        "summary.open" => "Open: {count}",
        "page.footer" => "Page {page} of {pages}",
        "progress.detect" => "Detecting capabilities",
        "progress.fonts" => "Preparing fonts",
        "progress.layout" => "Laying out pages",
        "progress.render" => "Rendering document",
        "progress.raster" => "Rasterizing pages",
        "progress.print" => "Opening print dialog",
        "progress.deliver" => "Delivering document",
        "progress.done" => "Done",
        "progress.failed" => "Generation failed",
        _ => key,
    }
    .to_string()
}
