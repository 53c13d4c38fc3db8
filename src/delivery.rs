//! Artifact delivery.
//!
//! Given final bytes, pick the best available mechanism in snapshot order:
//! native save dialog, share sheet with file support, plain byte-stream
//! download. Each failed channel logs and falls through; only a failure of
//! the universal download sink surfaces as an error.

use crate::capability::CapabilitySnapshot;
use crate::platform::PlatformBridge;
use crate::types::DeliveryMethod;
use log::{debug, warn};
use thiserror::Error;

/// Error type for a fully exhausted delivery attempt.
#[derive(Error, Debug, Clone)]
pub enum DeliveryError {
    #[error("every delivery channel failed: {0}")]
    Exhausted(String),
}

/// Deliver `bytes` under `filename` through the best channel the snapshot
/// reports as available.
pub fn deliver(
    bytes: &[u8],
    filename: &str,
    capabilities: &CapabilitySnapshot,
    platform: &dyn PlatformBridge,
) -> Result<DeliveryMethod, DeliveryError> {
    let mut failures: Vec<String> = Vec::new();

    if capabilities.file_save_access
        && let Some(dialog) = platform.save_dialog()
    {
        match dialog.save(filename, bytes) {
            Ok(()) => {
                debug!("delivered '{filename}' via native save dialog");
                return Ok(DeliveryMethod::NativeSave);
            }
            Err(e) => {
                warn!("native save failed, trying next channel: {e}");
                failures.push(format!("save: {e}"));
            }
        }
    }

    if capabilities.share_with_files
        && let Some(sheet) = platform.share_sheet()
    {
        match sheet.share(filename, bytes) {
            Ok(()) => {
                debug!("delivered '{filename}' via share sheet");
                return Ok(DeliveryMethod::ShareSheet);
            }
            Err(e) => {
                warn!("share sheet failed, trying next channel: {e}");
                failures.push(format!("share: {e}"));
            }
        }
    }

    match platform.download(filename, bytes) {
        Ok(()) => {
            debug!("delivered '{filename}' via plain download");
            Ok(DeliveryMethod::Download)
        }
        Err(e) => {
            failures.push(format!("download: {e}"));
            Err(DeliveryError::Exhausted(failures.join("; ")))
        }
    }
}
