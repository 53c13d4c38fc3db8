// src/render/pdf.rs
use super::RenderError;
use crate::fonts::FontAsset;
use crate::layout::{LaidOutPage, PageMetrics, PositionedLine};
use crate::platform::RasterPage;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use log::debug;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::io::{Cursor, Write};

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";
const PAGE_IMAGE: &str = "Im1";
const PRODUCER: &str = "checkpress";

/// Map text to single-byte WinAnsi-encoded string content.
///
/// Characters outside the Latin-1 range have no slot in a single-byte
/// encoding and degrade to `?`; the reliable-font strategy sanitizes its
/// input up front so this never silently fires there.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let code = c as u32;
            match code {
                0x20..=0x7E => code as u8,
                0xA0..=0xFF => code as u8,
                _ => b'?',
            }
        })
        .collect()
}

fn text_string(text: &str) -> Object {
    Object::String(encode_win_ansi(text), StringFormat::Literal)
}

/// Build the standard (non-embedded) base font object.
fn standard_font(doc: &mut Document, base: &str) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    })
}

/// Embed a TrueType face with WinAnsi encoding and metrics taken from the
/// face itself.
fn embed_truetype(doc: &mut Document, asset: &FontAsset) -> Result<ObjectId, RenderError> {
    let face = ttf_parser::Face::parse(&asset.data, 0)
        .map_err(|e| RenderError::Font(e.to_string()))?;
    let units = f32::from(face.units_per_em().max(1));
    let to_pdf = |v: f32| (v * 1000.0 / units).round() as i64;

    let widths: Vec<Object> = (32u32..=255)
        .map(|code| {
            let advance = char::from_u32(code)
                .and_then(|c| face.glyph_index(c))
                .and_then(|g| face.glyph_hor_advance(g))
                .map(|adv| to_pdf(f32::from(adv)))
                .unwrap_or(500);
            advance.into()
        })
        .collect();

    let bbox = face.global_bounding_box();
    let ascent = to_pdf(f32::from(face.ascender()));
    let descent = to_pdf(f32::from(face.descender()));

    let font_file_id = doc.add_object(Stream::new(
        dictionary! { "Length1" => asset.data.len() as i64 },
        asset.data.as_ref().clone(),
    ));

    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => asset.family.as_str(),
        "Flags" => 32,
        "FontBBox" => vec![
            to_pdf(f32::from(bbox.x_min)).into(),
            to_pdf(f32::from(bbox.y_min)).into(),
            to_pdf(f32::from(bbox.x_max)).into(),
            to_pdf(f32::from(bbox.y_max)).into(),
        ],
        "ItalicAngle" => 0,
        "Ascent" => ascent,
        "Descent" => descent,
        "CapHeight" => ascent,
        "StemV" => 80,
        "FontFile2" => font_file_id,
    });

    Ok(doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "TrueType",
        "BaseFont" => asset.family.as_str(),
        "FirstChar" => 32,
        "LastChar" => 255,
        "Widths" => widths,
        "FontDescriptor" => descriptor_id,
        "Encoding" => "WinAnsiEncoding",
    }))
}

fn document_info(doc: &mut Document, title: &str) -> ObjectId {
    doc.add_object(dictionary! {
        "Title" => text_string(title),
        "Producer" => text_string(PRODUCER),
    })
}

fn line_ops(ops: &mut Vec<Operation>, line: &PositionedLine, page_height: f32) {
    let font = if line.bold { BOLD_FONT } else { REGULAR_FONT };
    let baseline_y = page_height - line.y - line.font_size;
    ops.push(Operation::new("Tf", vec![font.into(), line.font_size.into()]));
    ops.push(Operation::new(
        "Tm",
        vec![
            1.into(),
            0.into(),
            0.into(),
            1.into(),
            line.x.into(),
            baseline_y.into(),
        ],
    ));
    ops.push(Operation::new("Tj", vec![text_string(&line.text)]));
}

/// Render laid-out pages as a vector-text PDF.
///
/// `embedded` substitutes the regular face; the bold face stays the
/// standard base font in either case.
pub fn render_text_document(
    pages: &[LaidOutPage],
    title: &str,
    embedded: Option<&FontAsset>,
) -> Result<Vec<u8>, RenderError> {
    if pages.is_empty() {
        return Err(RenderError::Empty);
    }
    let metrics = PageMetrics::a4();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = match embedded {
        Some(asset) => embed_truetype(&mut doc, asset)?,
        None => standard_font(&mut doc, "Helvetica"),
    };
    let bold_id = standard_font(&mut doc, "Helvetica-Bold");

    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular_id,
            BOLD_FONT => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let mut ops = vec![Operation::new("BT", vec![])];
        if let Some(header) = &page.header {
            line_ops(&mut ops, header, metrics.height);
        }
        for line in &page.lines {
            line_ops(&mut ops, line, metrics.height);
        }
        if let Some(footer) = &page.footer {
            line_ops(&mut ops, footer, metrics.height);
        }
        ops.push(Operation::new("ET", vec![]));

        let content = Content { operations: ops };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                metrics.width.into(),
                metrics.height.into(),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = document_info(&mut doc, title);
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut cursor = Cursor::new(Vec::new());
    doc.save_to(&mut cursor)?;
    let bytes = cursor.into_inner();
    debug!("text document: {} pages, {} bytes", pages.len(), bytes.len());
    Ok(bytes)
}

/// Render one full-page image per input bitmap.
pub fn render_raster_document(raster_pages: &[RasterPage]) -> Result<Vec<u8>, RenderError> {
    if raster_pages.is_empty() {
        return Err(RenderError::Empty);
    }
    let metrics = PageMetrics::a4();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::with_capacity(raster_pages.len());
    for raster in raster_pages {
        if !raster.is_well_formed() {
            return Err(RenderError::MalformedRaster {
                width_px: raster.width_px,
                height_px: raster.height_px,
                byte_len: raster.rgb.len(),
            });
        }

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&raster.rgb)?;
        let compressed = encoder.finish()?;

        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => raster.width_px as i64,
                "Height" => raster.height_px as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
            },
            compressed,
        ));

        let resources_id = doc.add_object(dictionary! {
            "XObject" => dictionary! { PAGE_IMAGE => image_id },
        });

        // Stretch the bitmap over the whole media box.
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        metrics.width.into(),
                        0.into(),
                        0.into(),
                        metrics.height.into(),
                        0.into(),
                        0.into(),
                    ],
                ),
                Operation::new("Do", vec![PAGE_IMAGE.into()]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                metrics.width.into(),
                metrics.height.into(),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = document_info(&mut doc, "");
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut cursor = Cursor::new(Vec::new());
    doc.save_to(&mut cursor)?;
    let bytes = cursor.into_inner();
    debug!(
        "raster document: {} pages, {} bytes",
        raster_pages.len(),
        bytes.len()
    );
    Ok(bytes)
}
