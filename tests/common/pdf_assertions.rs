//! Assertions over parsed lopdf documents.

use lopdf::Document as LopdfDocument;

/// Extract all text content from a PDF document.
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

/// Per-page extracted text, for footer/numbering assertions.
pub fn extract_page_texts(doc: &LopdfDocument) -> Vec<String> {
    let pages = doc.get_pages();
    (1..=pages.len())
        .map(|page_num| doc.extract_text(&[page_num as u32]).unwrap_or_default())
        .collect()
}

/// Font base names referenced by the document.
pub fn extract_font_names(doc: &LopdfDocument) -> Vec<String> {
    let mut fonts = std::collections::HashSet::new();
    for (_id, object) in doc.objects.iter() {
        if let Ok(dict) = object.as_dict()
            && dict
                .get(b"Type")
                .and_then(|t| t.as_name())
                .is_ok_and(|n| n == b"Font")
            && let Ok(base) = dict.get(b"BaseFont")
            && let Ok(name) = base.as_name()
        {
            fonts.insert(String::from_utf8_lossy(name).to_string());
        }
    }
    fonts.into_iter().collect()
}

/// Page dimensions (width, height) in points, resolved through the page
/// tree's inheritable MediaBox.
pub fn get_page_dimensions(doc: &LopdfDocument, page_num: u32) -> Option<(f32, f32)> {
    let pages = doc.get_pages();
    let page_id = pages.get(&page_num)?;
    let page_dict = doc.get_object(*page_id).ok()?.as_dict().ok()?;

    let media_box = match page_dict.get(b"MediaBox") {
        Ok(mb) => mb.clone(),
        Err(_) => {
            let parent_id = page_dict.get(b"Parent").ok()?.as_reference().ok()?;
            doc.get_object(parent_id)
                .ok()?
                .as_dict()
                .ok()?
                .get(b"MediaBox")
                .ok()?
                .clone()
        }
    };

    let arr = media_box.as_array().ok()?;
    if arr.len() < 4 {
        return None;
    }
    let width = arr[2].as_float().ok()? - arr[0].as_float().ok()?;
    let height = arr[3].as_float().ok()? - arr[1].as_float().ok()?;
    Some((width, height))
}

/// Assert that a PDF contains specific text.
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert that a PDF does NOT contain specific text.
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            !extracted.contains($text),
            "PDF should NOT contain '{}', but it was found in:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF.
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert a minimum number of pages.
#[macro_export]
macro_rules! assert_pdf_min_pages {
    ($pdf:expr, $min:expr) => {
        assert!(
            $pdf.page_count() >= $min,
            "Expected at least {} pages, got {}",
            $min,
            $pdf.page_count()
        );
    };
}
