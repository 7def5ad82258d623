//! Session state manager
//!
//! One `Session` per run owns every piece of mutable state: the entered
//! text, the API key, the heading list, the loading/error flags, the
//! theme and reveal-key flags, and the transient copied indicator. All
//! mutation happens from the caller's own event-handling turns; the
//! network round trip lives in [`crate::deepseek`] and reports back via
//! [`Session::apply_result`].

use crate::error::HeadingError;
use crate::settings::{SettingsStore, KEY_API_KEY, KEY_DARK_MODE};
use std::time::{Duration, Instant};
use tracing::warn;

/// How long a copied indicator stays lit.
const COPY_FLASH: Duration = Duration::from_millis(2000);

/// Transient per-row "copied" marker. A later copy replaces the marker
/// outright, so rapid copies on different rows never revert early.
#[derive(Debug, Clone, Copy)]
struct CopiedMarker {
    index: usize,
    at: Instant,
}

pub struct Session {
    raw_text: String,
    api_key: String,
    headings: Vec<String>,
    loading: bool,
    error: Option<String>,
    dark_mode: bool,
    reveal_key: bool,
    copied: Option<CopiedMarker>,
    store: Box<dyn SettingsStore>,
}

impl Session {
    /// Create a session, hydrating the API key and theme from the store.
    pub fn new(store: Box<dyn SettingsStore>) -> Self {
        let api_key = store.get(KEY_API_KEY).unwrap_or_default();
        // Default to dark when nothing is persisted yet.
        let dark_mode = store
            .get(KEY_DARK_MODE)
            .map(|v| v == "true")
            .unwrap_or(true);

        Self {
            raw_text: String::new(),
            api_key,
            headings: Vec::new(),
            loading: false,
            error: None,
            dark_mode,
            reveal_key: false,
            copied: None,
            store,
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn headings(&self) -> &[String] {
        &self.headings
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn reveal_key(&self) -> bool {
        self.reveal_key
    }

    pub fn set_text(&mut self, text: &str) {
        self.raw_text = text.to_string();
    }

    /// Update the key and persist it on every change.
    pub fn set_api_key(&mut self, key: &str) {
        self.api_key = key.to_string();
        if let Err(e) = self.store.set(KEY_API_KEY, &self.api_key) {
            warn!("Failed to persist API key: {}", e);
        }
    }

    /// Flip the theme and persist the flag. The renderer picks the new
    /// palette up on its next draw, which happens in the same turn.
    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        let value = if self.dark_mode { "true" } else { "false" };
        if let Err(e) = self.store.set(KEY_DARK_MODE, value) {
            warn!("Failed to persist dark mode: {}", e);
        }
    }

    pub fn toggle_reveal_key(&mut self) {
        self.reveal_key = !self.reveal_key;
    }

    /// Validate preconditions and enter the loading state.
    ///
    /// Blank text or a blank key fails here, before any network call.
    /// On success the caller owes exactly one extraction round trip,
    /// delivered back through [`apply_result`](Self::apply_result).
    /// Overlapping requests are neither deduplicated nor cancelled; the
    /// last response to resolve wins.
    pub fn begin_request(&mut self) -> Result<(), HeadingError> {
        if self.raw_text.trim().is_empty() {
            let err = HeadingError::EmptyText;
            self.error = Some(err.to_string());
            return Err(err);
        }

        if self.api_key.trim().is_empty() {
            let err = HeadingError::EmptyApiKey;
            self.error = Some(err.to_string());
            return Err(err);
        }

        self.loading = true;
        self.error = None;
        Ok(())
    }

    /// Apply one completed extraction. Success replaces the heading list;
    /// failure populates the error and leaves the previous list visible.
    pub fn apply_result(&mut self, result: Result<Vec<String>, HeadingError>) {
        self.loading = false;
        match result {
            Ok(headings) => {
                self.headings = headings;
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
    }

    /// Flag `index` as freshly copied, replacing any pending marker.
    pub fn mark_copied(&mut self, index: usize) {
        self.copied = Some(CopiedMarker {
            index,
            at: Instant::now(),
        });
    }

    /// Which row currently shows the copied indicator, if any. Expired
    /// markers are cleared on read.
    pub fn copied_index(&mut self) -> Option<usize> {
        match self.copied {
            Some(marker) if marker.at.elapsed() < COPY_FLASH => Some(marker.index),
            Some(_) => {
                self.copied = None;
                None
            }
            None => None,
        }
    }
}
