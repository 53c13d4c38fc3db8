//! Individual feature probes.
//!
//! Every probe is best-effort and isolated: a bridge accessor that panics
//! is caught and reported as "feature absent" rather than taking the
//! detection pass down with it.

use crate::platform::PlatformBridge;
use log::warn;
use std::panic::{self, AssertUnwindSafe};

/// Run one probe, swallowing panics into `false`.
fn guarded(name: &str, probe: impl FnOnce() -> bool) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(probe)) {
        Ok(present) => present,
        Err(_) => {
            warn!("capability probe '{name}' panicked; treating feature as absent");
            false
        }
    }
}

pub(super) fn native_app(bridge: &dyn PlatformBridge) -> bool {
    guarded("native-app", || bridge.is_native_app())
}

pub(super) fn file_save_access(bridge: &dyn PlatformBridge) -> bool {
    guarded("file-save-access", || bridge.save_dialog().is_some())
}

pub(super) fn share_access(bridge: &dyn PlatformBridge) -> bool {
    guarded("share-access", || bridge.share_sheet().is_some())
}

pub(super) fn share_with_files(bridge: &dyn PlatformBridge) -> bool {
    guarded("share-with-files", || {
        bridge.share_sheet().is_some_and(|s| s.supports_files())
    })
}

pub(super) fn canvas(bridge: &dyn PlatformBridge) -> bool {
    guarded("canvas", || bridge.rasterizer().is_some())
}

pub(super) fn canvas_rasterization(bridge: &dyn PlatformBridge) -> bool {
    guarded("canvas-rasterization", || {
        bridge.rasterizer().is_some_and(|r| r.can_export_bitmap())
    })
}

pub(super) fn print_surface(bridge: &dyn PlatformBridge) -> bool {
    guarded("print-surface", || bridge.print_surface().is_some())
}

pub(super) fn notifications(bridge: &dyn PlatformBridge) -> bool {
    guarded("notifications", || bridge.supports_notifications())
}

/// More than one hardware thread means background work will not starve the
/// interactive path.
pub(super) fn background_worker() -> bool {
    guarded("background-worker", || num_cpus::get() > 1)
}

/// Can installed fonts be enumerated at all?
#[cfg(feature = "system-fonts")]
pub(super) fn font_enumeration() -> bool {
    guarded("font-enumeration", || {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        db.len() > 0
    })
}

#[cfg(not(feature = "system-fonts"))]
pub(super) fn font_enumeration() -> bool {
    false
}
