//! Shared data types bridging the capability, strategy and delivery phases.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a document generation strategy.
///
/// Strategies are registered in a [`StrategyRegistry`](crate::strategy::StrategyRegistry)
/// under their id; the orchestrator never matches on the variants itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyId {
    /// Hand the pre-rendered markup to the platform's native print flow.
    PrintFlow,
    /// Pure vector text placement; searchable, small output.
    TextLayout,
    /// Text layout with a guaranteed-legible font path.
    ReliableFont,
    /// One full-page bitmap per page; pixel-accurate, not searchable.
    RasterCanvas,
    /// Text layout routed through native save/share delivery.
    PlatformNative,
    /// Picks the best inner approach and delivery channel per snapshot.
    CapabilityOptimized,
}

impl StrategyId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyId::PrintFlow => "print-flow",
            StrategyId::TextLayout => "text-layout",
            StrategyId::ReliableFont => "reliable-font",
            StrategyId::RasterCanvas => "raster-canvas",
            StrategyId::PlatformNative => "platform-native",
            StrategyId::CapabilityOptimized => "capability-optimized",
        }
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the finished artifact reached the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryMethod {
    NativeSave,
    ShareSheet,
    Download,
}

/// Coarse bucket for the weighted capability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FeatureLevel {
    None,
    Minimal,
    Partial,
    Full,
}

/// Outcome of a single `generate()` call.
///
/// Invariant: `success == true` implies either `bytes` is populated or the
/// strategy completed an external flow (print dialog, share sheet) that
/// produces no bytes in this process.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub success: bool,
    pub bytes: Option<Vec<u8>>,
    pub strategy_used: StrategyId,
    pub duration_ms: u64,
    pub filename: String,
    pub error: Option<String>,
    pub delivered_via: Option<DeliveryMethod>,
}

impl GenerationResult {
    /// Successful result carrying the generated bytes.
    pub fn with_bytes(strategy: StrategyId, bytes: Vec<u8>) -> Self {
        GenerationResult {
            success: true,
            bytes: Some(bytes),
            strategy_used: strategy,
            duration_ms: 0,
            filename: String::new(),
            error: None,
            delivered_via: None,
        }
    }

    /// Successful result for a flow completed outside this process.
    pub fn external(strategy: StrategyId) -> Self {
        GenerationResult {
            success: true,
            bytes: None,
            strategy_used: strategy,
            duration_ms: 0,
            filename: String::new(),
            error: None,
            delivered_via: None,
        }
    }

    /// Failed attempt; `message` feeds the orchestrator's aggregation.
    pub fn failure(strategy: StrategyId, message: impl Into<String>) -> Self {
        GenerationResult {
            success: false,
            bytes: None,
            strategy_used: strategy,
            duration_ms: 0,
            filename: String::new(),
            error: Some(message.into()),
            delivered_via: None,
        }
    }

    pub fn has_bytes(&self) -> bool {
        self.bytes.as_ref().is_some_and(|b| !b.is_empty())
    }
}
