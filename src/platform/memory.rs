//! In-memory bridge for tests and embedding scenarios.
//!
//! Every surface is opt-in and records what it was asked to do, so tests
//! can assert on the delivery path that was actually taken.

use super::{
    PageRasterizer, PlatformBridge, PlatformError, PrintSurface, RasterPage, SaveDialog,
    ShareSheet,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A delivery or print interaction observed by the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedDelivery {
    Saved { filename: String, len: usize },
    Shared { filename: String, len: usize },
    Downloaded { filename: String, len: usize },
    Printed { markup_len: usize },
}

type Journal = Arc<Mutex<Vec<RecordedDelivery>>>;

fn record(journal: &Journal, entry: RecordedDelivery) {
    if let Ok(mut entries) = journal.lock() {
        entries.push(entry);
    }
}

struct MemorySaveDialog {
    journal: Journal,
    fail: bool,
}

impl SaveDialog for MemorySaveDialog {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<(), PlatformError> {
        if self.fail {
            return Err(PlatformError::Failed("save dialog dismissed".into()));
        }
        record(
            &self.journal,
            RecordedDelivery::Saved {
                filename: filename.to_string(),
                len: bytes.len(),
            },
        );
        Ok(())
    }
}

struct MemoryShareSheet {
    journal: Journal,
    files: bool,
    fail: bool,
}

impl ShareSheet for MemoryShareSheet {
    fn supports_files(&self) -> bool {
        self.files
    }

    fn share(&self, filename: &str, bytes: &[u8]) -> Result<(), PlatformError> {
        if self.fail {
            return Err(PlatformError::Failed("share sheet unavailable".into()));
        }
        record(
            &self.journal,
            RecordedDelivery::Shared {
                filename: filename.to_string(),
                len: bytes.len(),
            },
        );
        Ok(())
    }
}

struct MemoryPrintSurface {
    journal: Journal,
    dismissed: AtomicBool,
    fail: bool,
}

impl PrintSurface for MemoryPrintSurface {
    fn present(&self, markup: &str) -> Result<(), PlatformError> {
        if self.fail {
            return Err(PlatformError::Failed("print surface blocked".into()));
        }
        record(
            &self.journal,
            RecordedDelivery::Printed {
                markup_len: markup.len(),
            },
        );
        // The in-memory surface has no user behind it; it closes at once.
        self.dismissed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_dismissed(&self) -> bool {
        self.dismissed.load(Ordering::SeqCst)
    }
}

struct MemoryRasterizer {
    export: bool,
}

impl MemoryRasterizer {
    /// Fixed A4-proportioned test bitmap, kept small on purpose.
    const BASE_W: u32 = 119;
    const BASE_H: u32 = 168;
}

impl PageRasterizer for MemoryRasterizer {
    fn can_export_bitmap(&self) -> bool {
        self.export
    }

    fn rasterize(&self, markup: &str, scale: f32) -> Result<Vec<RasterPage>, PlatformError> {
        if !self.export {
            return Err(PlatformError::Unsupported(
                "surface cannot export bitmaps".into(),
            ));
        }
        let scale = scale.max(1.0);
        let width_px = (Self::BASE_W as f32 * scale) as u32;
        let height_px = (Self::BASE_H as f32 * scale) as u32;

        // One page per form-feed-separated chunk. Pixels are LCG noise
        // seeded from the chunk: distinct markup yields distinct bitmaps,
        // and the data stays realistically incompressible.
        let pages = markup
            .split('\u{000C}')
            .map(|chunk| {
                let mut state = chunk
                    .bytes()
                    .fold(0x2545F491u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
                let rgb = (0..(width_px * height_px * 3) as usize)
                    .map(|_| {
                        state = state.wrapping_mul(1103515245).wrapping_add(12345);
                        (state >> 16) as u8
                    })
                    .collect();
                RasterPage {
                    width_px,
                    height_px,
                    rgb,
                }
            })
            .collect();
        Ok(pages)
    }
}

/// Configurable in-memory platform bridge.
#[derive(Default)]
pub struct InMemoryPlatform {
    native_app: bool,
    notifications: bool,
    fail_download: bool,
    save: Option<MemorySaveDialog>,
    share: Option<MemoryShareSheet>,
    print: Option<MemoryPrintSurface>,
    raster: Option<MemoryRasterizer>,
    journal: Journal,
}

impl InMemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_native_app(mut self) -> Self {
        self.native_app = true;
        self
    }

    pub fn with_notifications(mut self) -> Self {
        self.notifications = true;
        self
    }

    pub fn with_save_dialog(mut self) -> Self {
        self.save = Some(MemorySaveDialog {
            journal: self.journal.clone(),
            fail: false,
        });
        self
    }

    /// A save dialog that is present but always fails (user dismisses it).
    pub fn with_failing_save_dialog(mut self) -> Self {
        self.save = Some(MemorySaveDialog {
            journal: self.journal.clone(),
            fail: true,
        });
        self
    }

    pub fn with_share_sheet(mut self, files: bool) -> Self {
        self.share = Some(MemoryShareSheet {
            journal: self.journal.clone(),
            files,
            fail: false,
        });
        self
    }

    pub fn with_failing_share_sheet(mut self) -> Self {
        self.share = Some(MemoryShareSheet {
            journal: self.journal.clone(),
            files: true,
            fail: true,
        });
        self
    }

    pub fn with_print_surface(mut self) -> Self {
        self.print = Some(MemoryPrintSurface {
            journal: self.journal.clone(),
            dismissed: AtomicBool::new(false),
            fail: false,
        });
        self
    }

    pub fn with_failing_print_surface(mut self) -> Self {
        self.print = Some(MemoryPrintSurface {
            journal: self.journal.clone(),
            dismissed: AtomicBool::new(false),
            fail: true,
        });
        self
    }

    pub fn with_rasterizer(mut self) -> Self {
        self.raster = Some(MemoryRasterizer { export: true });
        self
    }

    /// A drawing surface without bitmap readback ("canvas-only").
    pub fn with_display_only_rasterizer(mut self) -> Self {
        self.raster = Some(MemoryRasterizer { export: false });
        self
    }

    pub fn with_failing_download(mut self) -> Self {
        self.fail_download = true;
        self
    }

    /// Everything the bridge was asked to deliver, in order.
    pub fn deliveries(&self) -> Vec<RecordedDelivery> {
        self.journal.lock().map(|j| j.clone()).unwrap_or_default()
    }
}

impl PlatformBridge for InMemoryPlatform {
    fn is_native_app(&self) -> bool {
        self.native_app
    }

    fn save_dialog(&self) -> Option<&dyn SaveDialog> {
        self.save.as_ref().map(|s| s as &dyn SaveDialog)
    }

    fn share_sheet(&self) -> Option<&dyn ShareSheet> {
        self.share.as_ref().map(|s| s as &dyn ShareSheet)
    }

    fn print_surface(&self) -> Option<&dyn PrintSurface> {
        self.print.as_ref().map(|s| s as &dyn PrintSurface)
    }

    fn rasterizer(&self) -> Option<&dyn PageRasterizer> {
        self.raster.as_ref().map(|s| s as &dyn PageRasterizer)
    }

    fn supports_notifications(&self) -> bool {
        self.notifications
    }

    fn download(&self, filename: &str, bytes: &[u8]) -> Result<(), PlatformError> {
        if self.fail_download {
            return Err(PlatformError::Failed("download sink rejected bytes".into()));
        }
        record(
            &self.journal,
            RecordedDelivery::Downloaded {
                filename: filename.to_string(),
                len: bytes.len(),
            },
        );
        Ok(())
    }
}
