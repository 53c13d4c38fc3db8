mod common;

use checkpress::{DocumentOptions, StrategyId};
use common::fixtures::*;
use common::pdf_assertions::extract_page_texts;
use common::{bare_pipeline, generate_pdf, TestResult};

fn text_layout_options() -> DocumentOptions {
    let mut options = DocumentOptions::default();
    options.mode = Some(StrategyId::TextLayout);
    options
}

#[test]
fn small_checklist_fits_one_page() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let pipeline = bare_pipeline();
    let pdf = generate_pdf(
        &pipeline,
        request_with_options(sample_snapshot(), text_layout_options()),
    )?;
    assert_pdf_page_count!(pdf, 1);
    Ok(())
}

#[test]
fn overflowing_checklist_spans_multiple_pages() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let pipeline = bare_pipeline();
    let pdf = generate_pdf(
        &pipeline,
        request_with_options(bulk_snapshot("Annual Inspection", 120, 6), text_layout_options()),
    )?;
    assert_pdf_min_pages!(pdf, 2);
    assert_pdf_contains_text!(pdf, "Item 0:");
    assert_pdf_contains_text!(pdf, "Item 119:");
    Ok(())
}

#[test]
fn footer_numbers_are_contiguous_from_one() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let pipeline = bare_pipeline();
    let pdf = generate_pdf(
        &pipeline,
        request_with_options(bulk_snapshot("Long List", 150, 5), text_layout_options()),
    )?;
    let pages = extract_page_texts(&pdf.doc);
    assert!(pages.len() > 1);

    let total = pages.len();
    for (idx, text) in pages.iter().enumerate() {
        let expected = format!("Page {} of {}", idx + 1, total);
        assert!(
            text.contains(&expected),
            "page {} should carry footer '{}', got:\n{}",
            idx + 1,
            expected,
            text
        );
    }
    Ok(())
}

#[test]
fn section_breaks_start_each_category_on_a_fresh_page() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let pipeline = bare_pipeline();
    let mut options = text_layout_options();
    options.section_breaks = true;
    let snapshot = bulk_snapshot("Sectioned", 12, 4);
    let pdf = generate_pdf(&pipeline, request_with_options(snapshot, options))?;
    assert_pdf_min_pages!(pdf, 4);

    let pages = extract_page_texts(&pdf.doc);
    // Category 2 must not share a page with category 1's items.
    let first_with_cat2 = pages
        .iter()
        .position(|t| t.contains("Category 2"))
        .expect("category 2 somewhere");
    assert!(first_with_cat2 >= 1);
    assert!(!pages[first_with_cat2].contains("Item 0:"));
    Ok(())
}

#[test]
fn running_header_appears_from_page_two() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let pipeline = bare_pipeline();
    let pdf = generate_pdf(
        &pipeline,
        request_with_options(bulk_snapshot("Header Title", 150, 3), text_layout_options()),
    )?;
    let pages = extract_page_texts(&pdf.doc);
    assert!(pages.len() >= 2);
    assert!(pages[1].contains("Header Title"));
    Ok(())
}

#[test]
fn summary_section_respects_option() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let pipeline = bare_pipeline();

    let mut options = text_layout_options();
    options.include_summary = true;
    let pdf = generate_pdf(&pipeline, request_with_options(sample_snapshot(), options))?;
    assert_pdf_contains_text!(pdf, "Summary");
    assert_pdf_contains_text!(pdf, "Completed: 2");
    assert_pdf_contains_text!(pdf, "Skipped: 1");

    let mut options = text_layout_options();
    options.include_summary = false;
    let pdf = generate_pdf(&pipeline, request_with_options(sample_snapshot(), options))?;
    assert_pdf_not_contains_text!(pdf, "Summary");
    Ok(())
}

#[test]
fn notes_and_guides_follow_their_flags() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let pipeline = bare_pipeline();

    let mut options = text_layout_options();
    options.include_notes = true;
    options.include_guides = true;
    let pdf = generate_pdf(&pipeline, request_with_options(sample_snapshot(), options))?;
    assert_pdf_contains_text!(pdf, "rear door latch is stiff");
    assert_pdf_contains_text!(pdf, "check both gauges");

    let mut options = text_layout_options();
    options.include_notes = false;
    options.include_guides = false;
    let pdf = generate_pdf(&pipeline, request_with_options(sample_snapshot(), options))?;
    assert_pdf_not_contains_text!(pdf, "rear door latch is stiff");
    assert_pdf_not_contains_text!(pdf, "check both gauges");
    Ok(())
}
