//! Checklist-to-blocks composition.
//!
//! Pure function of the snapshot, the options and the resolved font
//! metrics; the only injected behavior is the translator used for the
//! fixed labels (notes, guides, summary, footer).

use super::{paginate, BlockKind, LaidOutPage, LayoutBlock, PageMetrics, PositionedLine};
use crate::fonts::{visual_order, wrap_lines, FontLibrary, ScriptClass, TextMeasure};
use crate::request::{ChecklistSnapshot, DocumentOptions, ItemState};
use crate::Translator;
use itertools::Itertools;
use log::debug;

const BODY_SIZE: f32 = 11.0;
const TITLE_SIZE: f32 = 18.0;
const META_SIZE: f32 = 9.5;
const SECTION_SIZE: f32 = 13.0;
const ANNOTATION_DELTA: f32 = 1.5;
const LINE_FACTOR: f32 = 1.35;
const ITEM_INDENT: f32 = 14.0;
const ANNOTATION_INDENT: f32 = 30.0;

fn state_marker(state: ItemState) -> &'static str {
    match state {
        ItemState::Open => "[ ]",
        ItemState::Done => "[x]",
        ItemState::Skipped => "[-]",
    }
}

struct BlockBuilder<'a> {
    metrics: &'a PageMetrics,
    measure: &'a TextMeasure,
    script: ScriptClass,
    blocks: Vec<LayoutBlock>,
}

impl<'a> BlockBuilder<'a> {
    fn push(
        &mut self,
        kind: BlockKind,
        text: &str,
        font_size: f32,
        indent: f32,
        space_after: f32,
        bold: bool,
        starts_page: bool,
    ) {
        let max_width = self.metrics.content_width() - indent;
        let mut measure = self.measure.with_size(font_size);
        if bold {
            measure = measure.bold();
        }
        let lines = wrap_lines(text, max_width, |s| measure.width_of(s));
        let lines = lines
            .into_iter()
            .map(|line| visual_order(&line, self.script))
            .collect();
        self.blocks.push(LayoutBlock {
            kind,
            lines,
            font_size,
            line_height: font_size * LINE_FACTOR,
            indent,
            space_after,
            bold,
            starts_page,
        });
    }
}

/// Build the full block sequence for a snapshot.
pub(crate) fn compose_blocks(
    snapshot: &ChecklistSnapshot,
    options: &DocumentOptions,
    script: ScriptClass,
    measure: &TextMeasure,
    metrics: &PageMetrics,
    translate: &Translator,
) -> Vec<LayoutBlock> {
    let body_size = FontLibrary::recommended_font_size(script, BODY_SIZE);
    let mut builder = BlockBuilder {
        metrics,
        measure,
        script,
        blocks: Vec::new(),
    };

    let title = if snapshot.title.trim().is_empty() {
        translate("doc.untitled")
    } else {
        snapshot.title.clone()
    };
    builder.push(BlockKind::Title, &title, TITLE_SIZE, 0.0, 6.0, true, false);

    let meta = translate("doc.progress")
        .replace("{done}", &snapshot.completed_count().to_string())
        .replace("{total}", &snapshot.items.len().to_string());
    builder.push(BlockKind::Meta, &meta, META_SIZE, 0.0, 14.0, false, false);

    for (category, items) in &snapshot
        .items
        .iter()
        .chunk_by(|item| item.category.clone())
    {
        builder.push(
            BlockKind::SectionHeader,
            &category,
            SECTION_SIZE,
            0.0,
            4.0,
            true,
            options.section_breaks,
        );

        for item in items {
            let row = format!("{} {}", state_marker(item.state), item.text);
            builder.push(BlockKind::Item, &row, body_size, ITEM_INDENT, 2.0, false, false);

            if options.include_notes
                && let Some(note) = &item.note
            {
                let label = translate("item.note");
                builder.push(
                    BlockKind::Annotation,
                    &format!("{label}: {note}"),
                    body_size - ANNOTATION_DELTA,
                    ANNOTATION_INDENT,
                    2.0,
                    false,
                    false,
                );
            }

            if options.include_guides
                && let Some(guide) = &item.guide
            {
                let label = translate("item.guide");
                builder.push(
                    BlockKind::Annotation,
                    &format!("{label}: {guide}"),
                    body_size - ANNOTATION_DELTA,
                    ANNOTATION_INDENT,
                    2.0,
                    false,
                    false,
                );
            }
        }

        if let Some(last) = builder.blocks.last_mut() {
            last.space_after += 8.0;
        }
    }

    if options.include_summary {
        builder.push(
            BlockKind::Summary,
            &translate("summary.title"),
            SECTION_SIZE,
            0.0,
            4.0,
            true,
            false,
        );
        let done = snapshot.completed_count();
        let skipped = snapshot.skipped_count();
        let open = snapshot.items.len() - done - skipped;
        let summary_line = |key: &str, count: usize| {
            translate(key).replace("{count}", &count.to_string())
        };
        let body = [
            summary_line("summary.completed", done),
            summary_line("summary.skipped", skipped),
            summary_line("summary.open", open),
        ]
        .join("\n");
        builder.push(BlockKind::Summary, &body, body_size, ITEM_INDENT, 0.0, false, false);
    }

    builder.blocks
}

/// Compose, paginate and decorate the document: returns pages with running
/// headers and "page n of m" footers filled in (second pass, so totals are
/// exact).
pub fn compose_document(
    snapshot: &ChecklistSnapshot,
    options: &DocumentOptions,
    script: ScriptClass,
    measure: &TextMeasure,
    translate: &Translator,
) -> Vec<LaidOutPage> {
    let metrics = PageMetrics::a4();
    let blocks = compose_blocks(snapshot, options, script, measure, &metrics, translate);
    let mut pages = paginate(&blocks, &metrics);
    debug!(
        "composed {} blocks into {} pages",
        blocks.len(),
        pages.len()
    );

    let total = pages.len();
    let footer_template = translate("page.footer");
    for page in &mut pages {
        let footer = footer_template
            .replace("{page}", &page.number.to_string())
            .replace("{pages}", &total.to_string());
        let footer_width = TextMeasure::new(None, META_SIZE).width_of(&footer);
        page.footer = Some(PositionedLine {
            text: footer,
            x: (metrics.width - footer_width) / 2.0,
            y: metrics.height - metrics.margin - META_SIZE,
            font_size: META_SIZE,
            bold: false,
        });

        // Running header from page 2 on; page 1 opens with the title block.
        if page.number > 1 {
            page.header = Some(PositionedLine {
                text: snapshot.title.clone(),
                x: metrics.margin,
                y: metrics.margin,
                font_size: META_SIZE,
                bold: false,
            });
        }
    }

    pages
}
