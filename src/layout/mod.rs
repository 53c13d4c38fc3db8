//! Deterministic text layout and pagination.
//!
//! The composer turns a checklist snapshot into [`LayoutBlock`]s; the
//! pagination pass assigns wrapped lines to pages, splitting multi-line
//! blocks at line granularity. Footers are rendered in a second pass once
//! the page total is known.

pub mod composer;

pub use composer::compose_document;

/// Tolerance for floating point height comparisons.
const EPSILON: f32 = 0.01;

/// Page geometry in PDF points.
#[derive(Debug, Clone, Copy)]
pub struct PageMetrics {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    /// Reserved band at the top for the running header.
    pub header_band: f32,
    /// Reserved band at the bottom for the page-number footer.
    pub footer_band: f32,
}

impl PageMetrics {
    /// A4 portrait with the engine's standard margins.
    pub fn a4() -> Self {
        PageMetrics {
            width: 595.0,
            height: 842.0,
            margin: 40.0,
            header_band: 22.0,
            footer_band: 26.0,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// First baseline-grid position below the header band.
    pub fn content_top(&self) -> f32 {
        self.margin + self.header_band
    }

    /// Lowest position content may extend to.
    pub fn content_bottom(&self) -> f32 {
        self.height - self.margin - self.footer_band
    }

    pub fn usable_height(&self) -> f32 {
        self.content_bottom() - self.content_top()
    }
}

/// Role of a block in the document; drives styling in the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Title,
    Meta,
    SectionHeader,
    Item,
    Annotation,
    Summary,
}

/// A measured run of wrapped lines, ready for pagination.
#[derive(Debug, Clone)]
pub struct LayoutBlock {
    pub kind: BlockKind,
    pub lines: Vec<String>,
    pub font_size: f32,
    pub line_height: f32,
    pub indent: f32,
    pub space_after: f32,
    pub bold: bool,
    /// Force a page break before this block (section breaks).
    pub starts_page: bool,
}

impl LayoutBlock {
    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height + self.space_after
    }
}

/// A single placed line of text, y measured downward from the page top.
#[derive(Debug, Clone)]
pub struct PositionedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub bold: bool,
}

/// One laid-out page. `number` is 1-based and drives the footer.
#[derive(Debug, Clone, Default)]
pub struct LaidOutPage {
    pub number: usize,
    pub lines: Vec<PositionedLine>,
    pub header: Option<PositionedLine>,
    pub footer: Option<PositionedLine>,
}

pub(crate) struct BreakAnalysis {
    pub should_break: bool,
    pub lines_that_fit: usize,
}

/// Check how much of a block fits below `cursor_y`.
pub(crate) fn check_block_fit(
    cursor_y: f32,
    block: &LayoutBlock,
    metrics: &PageMetrics,
) -> BreakAnalysis {
    let available = (metrics.content_bottom() - cursor_y).max(0.0);
    let fits_whole = block.height() <= available + EPSILON;
    let lines_that_fit = ((available + EPSILON) / block.line_height).floor() as usize;
    BreakAnalysis {
        should_break: !fits_whole,
        lines_that_fit,
    }
}

/// Assign blocks to pages. Blocks taller than the remaining space move to a
/// fresh page when they fit there; blocks taller than a whole page are
/// split at line granularity.
pub(crate) fn paginate(blocks: &[LayoutBlock], metrics: &PageMetrics) -> Vec<LaidOutPage> {
    let mut pages: Vec<LaidOutPage> = vec![LaidOutPage {
        number: 1,
        ..Default::default()
    }];
    let mut cursor_y = metrics.content_top();

    let page_pristine =
        |pages: &Vec<LaidOutPage>, cursor: f32| pages.last().is_some_and(|p| p.lines.is_empty()) && cursor <= metrics.content_top() + EPSILON;

    let new_page = |pages: &mut Vec<LaidOutPage>, cursor: &mut f32| {
        let next = pages.len() + 1;
        pages.push(LaidOutPage {
            number: next,
            ..Default::default()
        });
        *cursor = metrics.content_top();
    };

    for block in blocks {
        if block.starts_page && !page_pristine(&pages, cursor_y) {
            new_page(&mut pages, &mut cursor_y);
        }

        let mut line_cursor = 0;
        while line_cursor < block.lines.len() {
            let analysis = check_block_fit(cursor_y, block, metrics);

            let remaining_lines = block.lines.len() - line_cursor;
            let fits_here = analysis.lines_that_fit.min(remaining_lines);

            if fits_here == 0 {
                if page_pristine(&pages, cursor_y) {
                    // Degenerate geometry: place one line anyway so the
                    // pass always terminates.
                    place_lines(&mut pages, block, line_cursor, 1, &mut cursor_y, metrics);
                    line_cursor += 1;
                    continue;
                }
                new_page(&mut pages, &mut cursor_y);
                continue;
            }

            // Whole block fits on a fresh page: prefer moving it over
            // splitting a short block across a boundary.
            if analysis.should_break
                && !page_pristine(&pages, cursor_y)
                && block.height() <= metrics.usable_height() + EPSILON
                && line_cursor == 0
            {
                new_page(&mut pages, &mut cursor_y);
                continue;
            }

            place_lines(
                &mut pages,
                block,
                line_cursor,
                fits_here,
                &mut cursor_y,
                metrics,
            );
            line_cursor += fits_here;

            if line_cursor < block.lines.len() {
                new_page(&mut pages, &mut cursor_y);
            }
        }

        cursor_y += block.space_after;
    }

    pages
}

fn place_lines(
    pages: &mut [LaidOutPage],
    block: &LayoutBlock,
    from: usize,
    count: usize,
    cursor_y: &mut f32,
    metrics: &PageMetrics,
) {
    if let Some(page) = pages.last_mut() {
        for line in block.lines.iter().skip(from).take(count) {
            page.lines.push(PositionedLine {
                text: line.clone(),
                x: metrics.margin + block.indent,
                y: *cursor_y,
                font_size: block.font_size,
                bold: block.bold,
            });
            *cursor_y += block.line_height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lines: usize, line_height: f32) -> LayoutBlock {
        LayoutBlock {
            kind: BlockKind::Item,
            lines: (0..lines).map(|i| format!("line {i}")).collect(),
            font_size: 11.0,
            line_height,
            indent: 0.0,
            space_after: 4.0,
            bold: false,
            starts_page: false,
        }
    }

    #[test]
    fn single_block_stays_on_one_page() {
        let metrics = PageMetrics::a4();
        let pages = paginate(&[block(3, 14.0)], &metrics);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].lines.len(), 3);
        assert_eq!(pages[0].number, 1);
    }

    #[test]
    fn overflowing_content_spans_pages_with_contiguous_numbers() {
        let metrics = PageMetrics::a4();
        let blocks: Vec<_> = (0..80).map(|_| block(2, 14.0)).collect();
        let pages = paginate(&blocks, &metrics);
        assert!(pages.len() > 1);
        for (idx, page) in pages.iter().enumerate() {
            assert_eq!(page.number, idx + 1);
            assert!(!page.lines.is_empty());
        }
    }

    #[test]
    fn block_taller_than_a_page_is_split_by_lines() {
        let metrics = PageMetrics::a4();
        let tall = block(120, 14.0);
        let pages = paginate(&[tall.clone()], &metrics);
        assert!(pages.len() > 1);
        let placed: usize = pages.iter().map(|p| p.lines.len()).sum();
        assert_eq!(placed, tall.lines.len());
    }

    #[test]
    fn starts_page_forces_a_break_unless_pristine() {
        let metrics = PageMetrics::a4();
        let mut second = block(2, 14.0);
        second.starts_page = true;
        // Leading section break on a pristine page must not create a blank
        // first page.
        let pages = paginate(&[second.clone()], &metrics);
        assert_eq!(pages.len(), 1);

        let pages = paginate(&[block(2, 14.0), second], &metrics);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].lines.len(), 2);
    }

    #[test]
    fn short_block_moves_whole_to_next_page_instead_of_splitting() {
        let metrics = PageMetrics::a4();
        let usable = metrics.usable_height();
        let filler_lines = (usable / 14.0).floor() as usize - 1;
        let blocks = vec![block(filler_lines, 14.0), block(4, 14.0)];
        let pages = paginate(&blocks, &metrics);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].lines.len(), 4);
    }
}
