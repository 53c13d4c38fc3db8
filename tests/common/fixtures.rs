//! Snapshot and request builders shared by the integration suites.

use checkpress::{ChecklistItem, ChecklistSnapshot, DocumentOptions, DocumentRequest, ItemState};

pub fn item(category: &str, text: &str, state: ItemState) -> ChecklistItem {
    ChecklistItem {
        id: format!("{category}/{text}"),
        category: category.to_string(),
        text: text.to_string(),
        state,
        note: None,
        guide: None,
    }
}

/// A small realistic checklist: two categories, mixed states, one note and
/// one guide.
pub fn sample_snapshot() -> ChecklistSnapshot {
    let mut doors = item("Cabin", "Doors closed and locked", ItemState::Done);
    doors.note = Some("rear door latch is stiff".into());
    let mut fuel = item("Engine", "Fuel selector on fullest tank", ItemState::Open);
    fuel.guide = Some("check both gauges before switching".into());

    ChecklistSnapshot {
        title: "Before Start".into(),
        items: vec![
            doors,
            item("Cabin", "Seatbelts fastened", ItemState::Done),
            fuel,
            item("Engine", "Mixture rich", ItemState::Open),
            item("Engine", "Carb heat cold", ItemState::Skipped),
        ],
    }
}

/// `count` items spread evenly over `categories` category names.
pub fn bulk_snapshot(title: &str, count: usize, categories: usize) -> ChecklistSnapshot {
    let per_category = count.div_ceil(categories.max(1));
    let items = (0..count)
        .map(|i| {
            let category = format!("Category {}", i / per_category + 1);
            item(
                &category,
                &format!(
                    "Item {i}: verify the relevant system is configured and \
                     cross-check against the placard values"
                ),
                if i % 3 == 0 {
                    ItemState::Done
                } else {
                    ItemState::Open
                },
            )
        })
        .collect();
    ChecklistSnapshot {
        title: title.to_string(),
        items,
    }
}

pub fn request(snapshot: ChecklistSnapshot) -> DocumentRequest {
    DocumentRequest::new(snapshot)
}

pub fn request_with_options(
    snapshot: ChecklistSnapshot,
    options: DocumentOptions,
) -> DocumentRequest {
    DocumentRequest::new(snapshot).with_options(options)
}

/// Markup fixture: three pages separated by form feeds, the shape the
/// in-memory rasterizer and print surface consume.
pub fn sample_markup() -> String {
    "<section>page one</section>\u{000C}<section>page two</section>\u{000C}<section>page three</section>"
        .to_string()
}
