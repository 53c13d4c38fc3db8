//! Text measurement and greedy line wrapping.

use super::{FontAsset, ScriptClass};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Advance widths for the built-in base font (Helvetica), ASCII 0x20..0x7F,
/// in 1/1000 em units.
static BASE_FONT_WIDTHS: Lazy<[u16; 95]> = Lazy::new(|| {
    [
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // !"#$%&'()*+,-./
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
        278, 278, 584, 584, 584, 556, // :;<=>?
        1015, // @
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722,
        667, 611, 722, 667, 944, 667, 667, 611, // A-Z
        278, 278, 278, 469, 556, 333, // [\]^_`
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333,
        500, 278, 556, 500, 722, 500, 500, 500, // a-z
        334, 260, 334, 584, // {|}~
    ]
});

/// Average advance used for characters outside the table.
const FALLBACK_ADVANCE: f32 = 556.0;
/// Ideographs are laid out as full-width.
const FULL_WIDTH_ADVANCE: f32 = 1000.0;
/// Bold metrics approximated from the regular table.
const BOLD_WIDTH_FACTOR: f32 = 1.08;

fn base_advance(c: char) -> f32 {
    let code = c as u32;
    if (0x20..0x7F).contains(&code) {
        BASE_FONT_WIDTHS[(code - 0x20) as usize] as f32
    } else if ScriptClass::of_char(c) == ScriptClass::Cjk {
        FULL_WIDTH_ADVANCE
    } else {
        FALLBACK_ADVANCE
    }
}

/// Width function over a font asset (when loaded) or the built-in base
/// font metrics. Widths are returned in points for the configured size.
#[derive(Clone)]
pub struct TextMeasure {
    asset: Option<Arc<FontAsset>>,
    font_size: f32,
    bold: bool,
}

impl TextMeasure {
    pub fn new(asset: Option<Arc<FontAsset>>, font_size: f32) -> Self {
        TextMeasure {
            asset,
            font_size,
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Same backing face, different size.
    pub fn with_size(&self, font_size: f32) -> Self {
        TextMeasure {
            asset: self.asset.clone(),
            font_size,
            bold: self.bold,
        }
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Width of `text` in points.
    pub fn width_of(&self, text: &str) -> f32 {
        let scale = self.font_size / 1000.0;
        let style_factor = if self.bold { BOLD_WIDTH_FACTOR } else { 1.0 };

        if let Some(asset) = &self.asset {
            // Face parsing is a header read over shared bytes; cheap enough
            // to redo per call and avoids a self-referential struct.
            if let Ok(face) = ttf_parser::Face::parse(&asset.data, 0) {
                let units = f32::from(face.units_per_em().max(1));
                let width: f32 = text
                    .chars()
                    .map(|c| {
                        face.glyph_index(c)
                            .and_then(|g| face.glyph_hor_advance(g))
                            .map(|adv| f32::from(adv) * 1000.0 / units)
                            .unwrap_or_else(|| base_advance(c))
                    })
                    .sum();
                return width * scale * style_factor;
            }
        }

        let width: f32 = text.chars().map(base_advance).sum();
        width * scale * style_factor
    }
}

/// Greedy word wrap.
///
/// Embedded newlines are respected; blank source lines survive as empty
/// output lines. A single word wider than `max_width` is emitted as its own
/// line rather than hyphenated.
pub fn wrap_lines<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    if max_width <= 0.0 {
        return text.lines().map(str::to_string).collect();
    }

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            let test_line = if current_line.is_empty() {
                word.to_string()
            } else {
                format!("{current_line} {word}")
            };

            if measure(&test_line) > max_width && !current_line.is_empty() {
                lines.push(current_line);
                current_line = word.to_string();
            } else {
                current_line = test_line;
            }
        }

        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }
    lines
}

/// Visual ordering for one wrapped line.
///
/// Right-to-left scripts are reversed character-by-character. This is an
/// approximation, not a bidirectional reordering: mixed-direction runs
/// inside one line will not be segmented.
pub fn visual_order(line: &str, script: ScriptClass) -> String {
    if script.is_rtl() {
        line.chars().rev().collect()
    } else {
        line.to_string()
    }
}

/// Replace every non-ASCII character with a safe placeholder. Used by the
/// reliable-font path when no multi-script font could be embedded.
pub fn sanitize_to_ascii(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii() { c } else { '?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measure() -> TextMeasure {
        TextMeasure::new(None, 10.0)
    }

    #[test]
    fn base_widths_scale_with_font_size() {
        let narrow = TextMeasure::new(None, 10.0);
        let wide = TextMeasure::new(None, 20.0);
        let w1 = narrow.width_of("word");
        let w2 = wide.width_of("word");
        assert!((w2 - w1 * 2.0).abs() < 0.001);
    }

    #[test]
    fn bold_is_wider_than_regular() {
        let regular = TextMeasure::new(None, 12.0);
        let bold = TextMeasure::new(None, 12.0).bold();
        assert!(bold.width_of("Title") > regular.width_of("Title"));
    }

    #[test]
    fn wrap_keeps_short_text_on_one_line() {
        let m = measure();
        let lines = wrap_lines("short text", 200.0, |s| m.width_of(s));
        assert_eq!(lines, vec!["short text"]);
    }

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        let m = measure();
        let lines = wrap_lines("alpha beta gamma delta", 40.0, |s| m.width_of(s));
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(!line.starts_with(' ') && !line.ends_with(' '));
        }
        assert_eq!(lines.join(" "), "alpha beta gamma delta");
    }

    #[test]
    fn overlong_word_gets_its_own_line_unhyphenated() {
        let m = measure();
        let lines = wrap_lines("a incomprehensibilities b", 30.0, |s| m.width_of(s));
        assert!(lines.contains(&"incomprehensibilities".to_string()));
    }

    #[test]
    fn embedded_newlines_and_blanks_survive() {
        let m = measure();
        let lines = wrap_lines("first\n\nsecond", 500.0, |s| m.width_of(s));
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn zero_width_falls_back_to_source_lines() {
        let lines = wrap_lines("a b c\nd", 0.0, |_| 1.0);
        assert_eq!(lines, vec!["a b c", "d"]);
    }

    #[test]
    fn rtl_lines_are_reversed() {
        assert_eq!(visual_order("abc", ScriptClass::Arabic), "cba");
        assert_eq!(visual_order("abc", ScriptClass::Latin), "abc");
    }

    #[test]
    fn sanitize_replaces_non_ascii_only() {
        assert_eq!(sanitize_to_ascii("ok \u{4F60}\u{597D}!"), "ok ??!");
        assert_eq!(sanitize_to_ascii("plain"), "plain");
    }
}
