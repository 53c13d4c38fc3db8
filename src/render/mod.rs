//! PDF assembly.
//!
//! One lopdf-based writer serves every strategy: the text strategies feed
//! it laid-out pages, the raster strategy feeds it bitmaps. Keeping a
//! single writer keeps the byte-level conventions (fonts, metadata,
//! object layout) identical across strategies.

mod pdf;

pub use pdf::{render_raster_document, render_text_document};

use thiserror::Error;

/// Error type for document assembly.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PDF encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("font face rejected for embedding: {0}")]
    Font(String),

    #[error("raster page is malformed: {width_px}x{height_px} with {byte_len} bytes")]
    MalformedRaster {
        width_px: u32,
        height_px: u32,
        byte_len: usize,
    },

    #[error("nothing to render: document has no pages")]
    Empty,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
