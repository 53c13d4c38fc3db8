//! Request-side data: the read-only checklist snapshot consumed from the
//! domain layer, the per-call options, and the injected callback types.

use crate::types::StrategyId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Completion state of a single checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    Open,
    Done,
    Skipped,
}

/// One checklist entry as handed over by the domain layer.
///
/// The engine never interprets these beyond printing them; scoring and
/// business rules live with the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    /// Display name of the category this item belongs to. Items arrive in
    /// document order; consecutive items with the same category form one
    /// printed section.
    pub category: String,
    pub text: String,
    pub state: ItemState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide: Option<String>,
}

/// Read-only snapshot of a checklist at generation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistSnapshot {
    pub title: String,
    pub items: Vec<ChecklistItem>,
}

impl ChecklistSnapshot {
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|i| i.state == ItemState::Done).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.items.iter().filter(|i| i.state == ItemState::Skipped).count()
    }
}

/// Per-call generation options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentOptions {
    pub include_guides: bool,
    pub include_notes: bool,
    pub include_summary: bool,
    /// Start every category on a fresh page.
    pub section_breaks: bool,
    /// Explicit strategy override; wins over the capability decision table.
    pub mode: Option<StrategyId>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        DocumentOptions {
            include_guides: false,
            include_notes: true,
            include_summary: true,
            section_breaks: false,
            mode: None,
        }
    }
}

/// Progress callback: `(percent 0..=100, message)`.
pub type ProgressFn = Arc<dyn Fn(u8, &str) + Send + Sync>;

/// Injected translation lookup, `key -> display string`.
pub type Translator = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Injected filename sanitizer, `title -> safe file stem`.
pub type FilenameSanitizer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Everything a strategy needs for one generation run. Immutable per
/// invocation; cloning shares the callback.
#[derive(Clone)]
pub struct DocumentRequest {
    pub snapshot: ChecklistSnapshot,
    pub options: DocumentOptions,
    /// Markup pre-rendered by the UI layer, consumed by the print-flow and
    /// raster-canvas strategies.
    pub rendered_markup: Option<String>,
    pub on_progress: Option<ProgressFn>,
}

impl DocumentRequest {
    pub fn new(snapshot: ChecklistSnapshot) -> Self {
        DocumentRequest {
            snapshot,
            options: DocumentOptions::default(),
            rendered_markup: None,
            on_progress: None,
        }
    }

    pub fn with_options(mut self, options: DocumentOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_markup(mut self, markup: impl Into<String>) -> Self {
        self.rendered_markup = Some(markup.into());
        self
    }

    pub fn with_progress(mut self, callback: ProgressFn) -> Self {
        self.on_progress = Some(callback);
        self
    }

    pub(crate) fn report_progress(&self, percent: u8, message: &str) {
        if let Some(cb) = &self.on_progress {
            cb(percent.min(100), message);
        }
    }
}

impl fmt::Debug for DocumentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentRequest")
            .field("title", &self.snapshot.title)
            .field("items", &self.snapshot.items.len())
            .field("options", &self.options)
            .field("has_markup", &self.rendered_markup.is_some())
            .field("has_progress", &self.on_progress.is_some())
            .finish()
    }
}
