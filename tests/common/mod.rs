pub mod fixtures;
pub mod pdf_assertions;

use checkpress::strategy::{GenerationContext, GeneratorStrategy, StrategyFuture};
use checkpress::{
    DocumentRequest, GenerationResult, InMemoryPlatform, PipelineBuilder, StrategyId,
};
use lopdf::Document as LopdfDocument;
use std::sync::{Arc, Mutex};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods.
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn from_result(result: &GenerationResult) -> Result<Self, Box<dyn std::error::Error>> {
        let bytes = result
            .bytes
            .clone()
            .ok_or_else(|| format!("result carries no bytes (error: {:?})", result.error))?;
        Self::from_bytes(bytes)
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }
}

/// Pipeline over a bare in-memory platform (no surfaces, empty font store).
pub fn bare_pipeline() -> checkpress::DocumentPipeline {
    PipelineBuilder::new()
        .with_platform(Arc::new(InMemoryPlatform::new()))
        .build()
        .expect("pipeline builds")
}

/// Pipeline over a caller-configured platform.
pub fn pipeline_with(platform: InMemoryPlatform) -> checkpress::DocumentPipeline {
    PipelineBuilder::new()
        .with_platform(Arc::new(platform))
        .build()
        .expect("pipeline builds")
}

/// Generate and parse, failing the test when no bytes came back.
pub fn generate_pdf(
    pipeline: &checkpress::DocumentPipeline,
    request: DocumentRequest,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let result = pipeline.generate_blocking(request);
    GeneratedPdf::from_result(&result)
}

/// A strategy that always fails with a fixed message, for fallback tests.
pub struct FailingStrategy {
    id: StrategyId,
    message: String,
}

impl FailingStrategy {
    pub fn new(id: StrategyId, message: impl Into<String>) -> Box<Self> {
        Box::new(Self {
            id,
            message: message.into(),
        })
    }
}

impl GeneratorStrategy for FailingStrategy {
    fn id(&self) -> StrategyId {
        self.id
    }

    fn generate<'a>(
        &'a self,
        _request: &'a DocumentRequest,
        _ctx: &'a GenerationContext,
    ) -> StrategyFuture<'a> {
        Box::pin(async move { GenerationResult::failure(self.id, self.message.clone()) })
    }
}

/// Records every attempt made against it, then fails, so tests can assert
/// on the orchestrator's attempt sequence.
pub struct RecordingStrategy {
    id: StrategyId,
    log: Arc<Mutex<Vec<StrategyId>>>,
}

impl RecordingStrategy {
    pub fn new(id: StrategyId, log: Arc<Mutex<Vec<StrategyId>>>) -> Box<Self> {
        Box::new(Self { id, log })
    }
}

impl GeneratorStrategy for RecordingStrategy {
    fn id(&self) -> StrategyId {
        self.id
    }

    fn generate<'a>(
        &'a self,
        _request: &'a DocumentRequest,
        _ctx: &'a GenerationContext,
    ) -> StrategyFuture<'a> {
        Box::pin(async move {
            if let Ok(mut log) = self.log.lock() {
                log.push(self.id);
            }
            GenerationResult::failure(self.id, "recorded failure")
        })
    }
}
