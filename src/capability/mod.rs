//! Runtime capability detection.
//!
//! [`CapabilityDetector`] probes the injected platform bridge once,
//! publishes an immutable [`CapabilitySnapshot`], and derives two things
//! from it: a coarse [`FeatureLevel`] score and the initial
//! [`StrategyId`] for a generation run. The snapshot is never recomputed
//! implicitly; callers invoke [`refresh`](CapabilityDetector::refresh) when
//! the environment may have changed.

mod probes;

use crate::platform::{OsFamily, PlatformBridge};
use crate::types::{FeatureLevel, StrategyId};
use log::debug;
use std::sync::{Arc, RwLock};

/// Immutable record of what the runtime can do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilitySnapshot {
    pub native_app: bool,
    pub file_save_access: bool,
    pub share_access: bool,
    pub share_with_files: bool,
    /// A drawing surface exists.
    pub canvas: bool,
    /// The drawing surface can export bitmaps.
    pub canvas_rasterization: bool,
    pub print_surface: bool,
    pub background_worker: bool,
    pub notifications: bool,
    /// Installed fonts can be enumerated.
    pub font_enumeration: bool,
    pub os: OsFamily,
}

impl Default for CapabilitySnapshot {
    fn default() -> Self {
        CapabilitySnapshot {
            native_app: false,
            file_save_access: false,
            share_access: false,
            share_with_files: false,
            canvas: false,
            canvas_rasterization: false,
            print_surface: false,
            background_worker: false,
            notifications: false,
            font_enumeration: false,
            os: OsFamily::Unknown,
        }
    }
}

/// Weighted feature score. Weights follow the delivery value of each
/// capability: native integration and file access dominate, cosmetic
/// features count once.
pub fn score_feature_level(snapshot: &CapabilitySnapshot) -> FeatureLevel {
    let mut score = 0u32;
    if snapshot.native_app {
        score += 4;
    }
    if snapshot.file_save_access {
        score += 3;
    }
    if snapshot.share_access {
        score += 2;
    }
    if snapshot.background_worker {
        score += 1;
    }
    if snapshot.notifications {
        score += 1;
    }
    if snapshot.canvas_rasterization {
        score += 1;
    }

    match score {
        8.. => FeatureLevel::Full,
        5..=7 => FeatureLevel::Partial,
        2..=4 => FeatureLevel::Minimal,
        _ => FeatureLevel::None,
    }
}

/// Fixed decision table mapping a snapshot to the initial strategy.
///
/// An explicit override always wins. Without one: native shells with file
/// access get the platform-native path, exporting canvases get the raster
/// path, display-only canvases get plain text layout, and everything else
/// falls back to the guaranteed-output reliable-font path.
pub fn select_strategy(
    snapshot: &CapabilitySnapshot,
    explicit_override: Option<StrategyId>,
) -> StrategyId {
    if let Some(mode) = explicit_override {
        debug!("strategy override requested: {mode}");
        return mode;
    }

    let selected = if snapshot.native_app && snapshot.file_save_access {
        StrategyId::PlatformNative
    } else if snapshot.canvas && snapshot.canvas_rasterization {
        StrategyId::RasterCanvas
    } else if snapshot.canvas {
        StrategyId::TextLayout
    } else {
        StrategyId::ReliableFont
    };
    debug!("strategy selected from capabilities: {selected}");
    selected
}

/// Probes the bridge and owns the process-scoped snapshot.
pub struct CapabilityDetector {
    bridge: Arc<dyn PlatformBridge>,
    snapshot: RwLock<CapabilitySnapshot>,
}

impl CapabilityDetector {
    /// Construct and run the initial detection pass.
    pub fn new(bridge: Arc<dyn PlatformBridge>) -> Self {
        let snapshot = Self::detect(bridge.as_ref());
        CapabilityDetector {
            bridge,
            snapshot: RwLock::new(snapshot),
        }
    }

    /// Synchronous, best-effort detection. Individual probes never
    /// propagate failures; see [`probes`].
    pub fn detect(bridge: &dyn PlatformBridge) -> CapabilitySnapshot {
        let snapshot = CapabilitySnapshot {
            native_app: probes::native_app(bridge),
            file_save_access: probes::file_save_access(bridge),
            share_access: probes::share_access(bridge),
            share_with_files: probes::share_with_files(bridge),
            canvas: probes::canvas(bridge),
            canvas_rasterization: probes::canvas_rasterization(bridge),
            print_surface: probes::print_surface(bridge),
            background_worker: probes::background_worker(),
            notifications: probes::notifications(bridge),
            font_enumeration: probes::font_enumeration(),
            os: bridge.os_family(),
        };
        debug!("capability snapshot: {snapshot:?}");
        snapshot
    }

    /// Current snapshot (cheap clone of plain flags).
    pub fn snapshot(&self) -> CapabilitySnapshot {
        self.snapshot
            .read()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Re-run detection and replace the snapshot wholesale.
    pub fn refresh(&self) {
        let fresh = Self::detect(self.bridge.as_ref());
        if let Ok(mut slot) = self.snapshot.write() {
            *slot = fresh;
        }
    }

    pub fn feature_level(&self) -> FeatureLevel {
        score_feature_level(&self.snapshot())
    }

    pub fn select(&self, explicit_override: Option<StrategyId>) -> StrategyId {
        select_strategy(&self.snapshot(), explicit_override)
    }
}
