//! Platform bridge abstraction.
//!
//! The engine never talks to an OS surface directly. Everything it can do
//! with the outside world — open a save dialog, hand a file to a share
//! sheet, drive a print flow, rasterize markup, drop bytes into the user's
//! download location — goes through a [`PlatformBridge`] injected at
//! pipeline construction. Capability probes inspect the same bridge, so a
//! bridge that offers nothing simply degrades the strategy selection.

mod headless;
mod memory;

pub use headless::HeadlessPlatform;
pub use memory::{InMemoryPlatform, RecordedDelivery};

use thiserror::Error;

/// Error type for platform surface operations.
#[derive(Error, Debug, Clone)]
pub enum PlatformError {
    #[error("Operation not supported on this platform: {0}")]
    Unsupported(String),

    #[error("Platform surface failed: {0}")]
    Failed(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for PlatformError {
    fn from(err: std::io::Error) -> Self {
        PlatformError::Io(err.to_string())
    }
}

/// Operating system family as reported by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Linux,
    MacOs,
    Windows,
    Android,
    Ios,
    Unknown,
}

impl OsFamily {
    /// Best-effort mapping from the compile-time target.
    pub fn current() -> Self {
        match std::env::consts::OS {
            "linux" => OsFamily::Linux,
            "macos" => OsFamily::MacOs,
            "windows" => OsFamily::Windows,
            "android" => OsFamily::Android,
            "ios" => OsFamily::Ios,
            _ => OsFamily::Unknown,
        }
    }
}

/// Native save dialog surface.
pub trait SaveDialog: Send + Sync {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<(), PlatformError>;
}

/// Native share sheet surface.
pub trait ShareSheet: Send + Sync {
    /// Whether the sheet accepts file attachments (not just text/links).
    fn supports_files(&self) -> bool;

    fn share(&self, filename: &str, bytes: &[u8]) -> Result<(), PlatformError>;
}

/// A presented print/export surface.
///
/// There is no portable completion event: after [`present`](Self::present)
/// the engine can only poll [`is_dismissed`](Self::is_dismissed), which
/// cannot distinguish "printed" from "cancelled".
pub trait PrintSurface: Send + Sync {
    /// Open the surface with the given markup and invoke the native print
    /// or export flow.
    fn present(&self, markup: &str) -> Result<(), PlatformError>;

    /// Best-effort: has the user closed the surface?
    fn is_dismissed(&self) -> bool;
}

/// One rasterized page: tightly packed 8-bit RGB.
#[derive(Debug, Clone)]
pub struct RasterPage {
    pub width_px: u32,
    pub height_px: u32,
    pub rgb: Vec<u8>,
}

impl RasterPage {
    pub fn is_well_formed(&self) -> bool {
        self.width_px > 0
            && self.height_px > 0
            && self.rgb.len() == (self.width_px * self.height_px * 3) as usize
    }
}

/// An offscreen drawing surface that can render markup.
pub trait PageRasterizer: Send + Sync {
    /// Whether the surface can export its content as bitmaps. A surface
    /// that only displays (no readback) answers `false`.
    fn can_export_bitmap(&self) -> bool;

    /// Render the markup into one bitmap per output page at the given
    /// upscale factor.
    fn rasterize(&self, markup: &str, scale: f32) -> Result<Vec<RasterPage>, PlatformError>;
}

/// The injected platform surface bundle.
///
/// `None` from an accessor means the capability is absent; probes treat a
/// panicking accessor the same way.
pub trait PlatformBridge: Send + Sync {
    /// Running inside an installed native shell (as opposed to a plain
    /// browser/headless context)?
    fn is_native_app(&self) -> bool {
        false
    }

    fn save_dialog(&self) -> Option<&dyn SaveDialog> {
        None
    }

    fn share_sheet(&self) -> Option<&dyn ShareSheet> {
        None
    }

    fn print_surface(&self) -> Option<&dyn PrintSurface> {
        None
    }

    fn rasterizer(&self) -> Option<&dyn PageRasterizer> {
        None
    }

    fn supports_notifications(&self) -> bool {
        false
    }

    fn os_family(&self) -> OsFamily {
        OsFamily::current()
    }

    /// Plain byte-stream download; the universal delivery fallback. Every
    /// bridge must implement this.
    fn download(&self, filename: &str, bytes: &[u8]) -> Result<(), PlatformError>;
}
