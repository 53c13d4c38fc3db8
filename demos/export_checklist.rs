//! End-to-end demo: build a checklist snapshot, generate a PDF through the
//! capability-selected strategy and deliver it to the current directory.
//!
//! Run with: `cargo run --example export_checklist`

use checkpress::{
    ChecklistItem, ChecklistSnapshot, DocumentOptions, DocumentRequest, HeadlessPlatform,
    ItemState, PipelineBuilder,
};
use std::sync::Arc;

fn item(category: &str, text: &str, state: ItemState, note: Option<&str>) -> ChecklistItem {
    ChecklistItem {
        id: format!("{category}:{text}"),
        category: category.to_string(),
        text: text.to_string(),
        state,
        note: note.map(str::to_string),
        guide: None,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let snapshot = ChecklistSnapshot {
        title: "Daily Opening Checklist".into(),
        items: vec![
            item("Front of House", "Unlock doors and disarm alarm", ItemState::Done, None),
            item("Front of House", "Wipe down tables and counters", ItemState::Done, None),
            item(
                "Front of House",
                "Check reservation list",
                ItemState::Open,
                Some("two large parties expected at noon"),
            ),
            item("Kitchen", "Fire up ovens and grills", ItemState::Done, None),
            item("Kitchen", "Verify fridge temperatures", ItemState::Open, None),
            item("Kitchen", "Check produce deliveries", ItemState::Skipped, None),
            item("Office", "Count opening float", ItemState::Open, None),
        ],
    };

    let pipeline = PipelineBuilder::new()
        .with_platform(Arc::new(HeadlessPlatform::new(".")))
        .build()?;

    let level = pipeline.detector().feature_level();
    println!("capability level: {level:?}");

    let mut options = DocumentOptions::default();
    options.include_notes = true;
    options.include_summary = true;

    let request = DocumentRequest::new(snapshot)
        .with_options(options)
        .with_progress(Arc::new(|pct, msg| println!("  {pct:>3}% {msg}")));

    let result = pipeline.generate_blocking(request);
    if !result.success {
        eprintln!("generation failed: {}", result.error.as_deref().unwrap_or("?"));
        std::process::exit(1);
    }

    println!(
        "generated {} ({} bytes) via {} in {}ms",
        result.filename,
        result.bytes.as_ref().map_or(0, Vec::len),
        result.strategy_used,
        result.duration_ms
    );

    let method = pipeline.deliver(&result)?;
    println!("delivered via {method:?}");
    Ok(())
}
