// src/error.rs
use crate::delivery::DeliveryError;
use crate::platform::PlatformError;
use crate::render::RenderError;
use crate::resource::ResourceError;
use thiserror::Error;

/// A comprehensive error type for the document generation pipeline.
///
/// `DocumentPipeline::generate` itself never returns this — every failure
/// below the orchestrator boundary is converted into a failed
/// [`GenerationResult`](crate::types::GenerationResult). `PipelineError`
/// surfaces only from construction (builder misuse) and from the
/// file-writing conveniences around the pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Resource loading failed: {0}")]
    Resource(#[from] ResourceError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Platform bridge failed: {0}")]
    Platform(#[from] PlatformError),

    #[error("Delivery failed: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pipeline is misconfigured: {0}")]
    Config(String),
}

impl From<serde_json::Error> for PipelineError {
    fn from(e: serde_json::Error) -> Self {
        PipelineError::Config(e.to_string())
    }
}
