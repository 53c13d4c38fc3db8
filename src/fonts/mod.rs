//! Font resource management.
//!
//! [`FontLibrary`] fetches and caches font byte assets per script family
//! through the injected [`ResourceProvider`]. The cache is process-scoped
//! and its writes are idempotent (first write for a family wins), so racing
//! `generate()` calls are harmless. Loading never errors out of the
//! library: a failed fetch is logged, remembered as a fallback marker and
//! reported as `None`, and the caller substitutes the built-in base font.

pub mod wrap;

pub use wrap::{sanitize_to_ascii, visual_order, wrap_lines, TextMeasure};

use crate::resource::{ResourceProvider, SharedResourceData};
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Bound on a single font-byte fetch, independent of any orchestrator
/// budget.
pub const FONT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Grouping of languages sharing font and rendering requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptClass {
    Latin,
    Cjk,
    Arabic,
    Devanagari,
}

impl ScriptClass {
    /// Font family carrying this script's glyphs.
    pub fn family_name(&self) -> &'static str {
        match self {
            ScriptClass::Latin => "NotoSans",
            ScriptClass::Cjk => "NotoSansCJK",
            ScriptClass::Arabic => "NotoNaskhArabic",
            ScriptClass::Devanagari => "NotoSansDevanagari",
        }
    }

    /// Provider path of the byte asset for this script's family.
    pub fn asset_path(&self) -> &'static str {
        match self {
            ScriptClass::Latin => "fonts/NotoSans-Regular.ttf",
            ScriptClass::Cjk => "fonts/NotoSansCJK-Regular.ttf",
            ScriptClass::Arabic => "fonts/NotoNaskhArabic-Regular.ttf",
            ScriptClass::Devanagari => "fonts/NotoSansDevanagari-Regular.ttf",
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, ScriptClass::Arabic)
    }

    /// Scripts whose glyph shapes need a little extra size to stay legible
    /// at body-text sizes.
    pub fn is_complex(&self) -> bool {
        matches!(self, ScriptClass::Arabic | ScriptClass::Devanagari)
    }

    /// Classify a single character by Unicode block.
    pub fn of_char(c: char) -> ScriptClass {
        match c as u32 {
            0x0600..=0x06FF | 0x0750..=0x077F | 0x08A0..=0x08FF | 0xFB50..=0xFDFF
            | 0xFE70..=0xFEFF => ScriptClass::Arabic,
            0x0900..=0x097F | 0xA8E0..=0xA8FF => ScriptClass::Devanagari,
            0x3040..=0x30FF | 0x3400..=0x4DBF | 0x4E00..=0x9FFF | 0xAC00..=0xD7AF
            | 0xF900..=0xFAFF => ScriptClass::Cjk,
            _ => ScriptClass::Latin,
        }
    }

    /// Dominant non-Latin script of a text, if any.
    pub fn dominant(text: &str) -> ScriptClass {
        let mut counts: HashMap<ScriptClass, usize> = HashMap::new();
        for c in text.chars().filter(|c| !c.is_ascii()) {
            *counts.entry(Self::of_char(c)).or_default() += 1;
        }
        counts
            .into_iter()
            .filter(|(script, _)| *script != ScriptClass::Latin)
            .max_by_key(|(_, count)| *count)
            .map(|(script, _)| script)
            .unwrap_or(ScriptClass::Latin)
    }
}

/// Load state of a cached family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Never requested.
    Unloaded,
    /// Bytes fetched and validated.
    Loaded,
    /// Fetch failed; the built-in base font substitutes for this family.
    Fallback,
}

/// A cached font byte asset for one script family.
#[derive(Debug, Clone)]
pub struct FontAsset {
    pub family: String,
    pub script: ScriptClass,
    pub data: SharedResourceData,
    pub state: LoadState,
}

/// Process-scoped font cache over a resource provider.
pub struct FontLibrary {
    provider: Arc<dyn ResourceProvider>,
    cache: RwLock<HashMap<String, Arc<FontAsset>>>,
}

impl FontLibrary {
    pub fn new(provider: Arc<dyn ResourceProvider>) -> Self {
        FontLibrary {
            provider,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch (once) the font asset for a script family.
    ///
    /// Returns `None` when the bytes cannot be fetched or are not a
    /// parsable font face; the failure is cached so the provider is not
    /// hammered on every generation.
    pub async fn load_for_script(&self, script: ScriptClass) -> Option<Arc<FontAsset>> {
        let family = script.family_name();

        if let Some(cached) = self.cached(family) {
            return match cached.state {
                LoadState::Loaded => Some(cached),
                _ => None,
            };
        }

        let provider = self.provider.clone();
        let path = script.asset_path().to_string();
        let fetch = tokio::task::spawn_blocking(move || provider.load(&path));

        let data = match tokio::time::timeout(FONT_FETCH_TIMEOUT, fetch).await {
            Ok(Ok(Ok(data))) => data,
            Ok(Ok(Err(e))) => {
                warn!("font fetch for '{family}' failed: {e}");
                self.remember_fallback(script);
                return None;
            }
            Ok(Err(join_err)) => {
                warn!("font fetch task for '{family}' aborted: {join_err}");
                self.remember_fallback(script);
                return None;
            }
            Err(_) => {
                // The blocking fetch keeps running detached; the cache write
                // stays idempotent if it eventually lands.
                warn!(
                    "font fetch for '{family}' timed out after {:?}",
                    FONT_FETCH_TIMEOUT
                );
                self.remember_fallback(script);
                return None;
            }
        };

        if ttf_parser::Face::parse(&data, 0).is_err() {
            warn!("asset for '{family}' is not a parsable font face");
            self.remember_fallback(script);
            return None;
        }

        debug!("loaded font '{family}' ({} bytes)", data.len());
        let asset = Arc::new(FontAsset {
            family: family.to_string(),
            script,
            data,
            state: LoadState::Loaded,
        });
        Some(self.insert_idempotent(family, asset))
    }

    /// Current load state for a family.
    pub fn state_of(&self, family: &str) -> LoadState {
        self.cached(family)
            .map(|a| a.state)
            .unwrap_or(LoadState::Unloaded)
    }

    /// Complex scripts get one extra point of size to stay legible.
    pub fn recommended_font_size(script: ScriptClass, base: f32) -> f32 {
        if script.is_complex() {
            base + 1.0
        } else {
            base
        }
    }

    fn cached(&self, family: &str) -> Option<Arc<FontAsset>> {
        self.cache
            .read()
            .ok()
            .and_then(|cache| cache.get(family).cloned())
    }

    fn remember_fallback(&self, script: ScriptClass) {
        let family = script.family_name();
        let marker = Arc::new(FontAsset {
            family: family.to_string(),
            script,
            data: Arc::new(Vec::new()),
            state: LoadState::Fallback,
        });
        self.insert_idempotent(family, marker);
    }

    /// First write for a family wins; concurrent loaders converge on one
    /// asset.
    fn insert_idempotent(&self, family: &str, asset: Arc<FontAsset>) -> Arc<FontAsset> {
        match self.cache.write() {
            Ok(mut cache) => cache
                .entry(family.to_string())
                .or_insert(asset)
                .clone(),
            Err(_) => asset,
        }
    }
}
