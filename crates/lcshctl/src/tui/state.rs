//! TUI state on top of the shared session

use lcsh_common::{DeepSeekClient, MemorySettingsStore, Session, TomlSettingsStore};

/// Which form field receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Text,
    ApiKey,
    Headings,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Text => Focus::ApiKey,
            Focus::ApiKey => Focus::Headings,
            Focus::Headings => Focus::Text,
        }
    }
}

/// Edit buffer with a char-indexed cursor. The cursor counts characters,
/// never bytes, so multi-byte input edits cleanly.
#[derive(Debug, Default, Clone)]
pub struct EditBuffer {
    text: String,
    cursor: usize,
}

impl EditBuffer {
    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte offset of the cursor's character position.
    fn byte_offset(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset();
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Remove the character before the cursor. Returns whether anything
    /// changed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_offset();
        self.text.remove(at);
        true
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.cursor < self.text.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

pub struct TuiState {
    pub session: Session,
    pub client: DeepSeekClient,
    pub focus: Focus,
    /// Edit buffer for the text area, mirrored into the session on change.
    pub text: EditBuffer,
    /// Edit buffer for the key field, mirrored (and persisted) on change.
    pub key: EditBuffer,
    /// Selected row in the headings list.
    pub selected: usize,
    pub spinner_frame: usize,
    pub show_help: bool,
}

impl TuiState {
    /// Load state, hydrating the session from the settings file. Falls
    /// back to an in-memory store when no config directory exists.
    pub fn load() -> Self {
        let session = match TomlSettingsStore::open() {
            Ok(store) => Session::new(Box::new(store)),
            Err(e) => {
                tracing::warn!("Settings unavailable, running in-memory: {}", e);
                Session::new(Box::new(MemorySettingsStore::new()))
            }
        };

        Self::with_session(session)
    }

    /// Build TUI state around an existing session.
    pub fn with_session(session: Session) -> Self {
        let key = EditBuffer::with_text(session.api_key());

        Self {
            session,
            client: DeepSeekClient::new(),
            focus: Focus::Text,
            text: EditBuffer::default(),
            key,
            selected: 0,
            spinner_frame: 0,
            show_help: false,
        }
    }

    /// Push the text buffer into the session after an edit.
    pub fn sync_text(&mut self) {
        let text = self.text.text().to_string();
        self.session.set_text(&text);
    }

    /// Push the key buffer into the session after an edit; the session
    /// persists it on every change.
    pub fn sync_key(&mut self) {
        let key = self.key.text().to_string();
        self.session.set_api_key(&key);
    }

    /// Keep the list selection inside the current heading list.
    pub fn clamp_selection(&mut self) {
        let len = self.session.headings().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycles() {
        assert_eq!(Focus::Text.next(), Focus::ApiKey);
        assert_eq!(Focus::ApiKey.next(), Focus::Headings);
        assert_eq!(Focus::Headings.next(), Focus::Text);
    }

    #[test]
    fn test_edit_buffer_ascii_round_trip() {
        let mut buf = EditBuffer::default();
        buf.insert('a');
        buf.insert('b');
        assert_eq!(buf.text(), "ab");

        buf.left();
        buf.insert('x');
        assert_eq!(buf.text(), "axb");

        buf.right();
        assert!(buf.backspace());
        assert_eq!(buf.text(), "ax");
    }

    #[test]
    fn test_edit_buffer_multibyte_insert() {
        let mut buf = EditBuffer::default();
        buf.insert('é');
        buf.insert('x');
        assert_eq!(buf.text(), "éx");
    }

    #[test]
    fn test_edit_buffer_multibyte_backspace_and_movement() {
        let mut buf = EditBuffer::with_text("café");
        assert!(buf.backspace());
        assert_eq!(buf.text(), "caf");

        let mut buf = EditBuffer::with_text("été");
        buf.left();
        buf.insert('s');
        assert_eq!(buf.text(), "étse");

        buf.right();
        assert!(buf.backspace());
        assert_eq!(buf.text(), "éts");
    }

    #[test]
    fn test_edit_buffer_cursor_starts_after_multibyte_text() {
        let mut buf = EditBuffer::with_text("clé");
        buf.insert('s');
        assert_eq!(buf.text(), "clés");
    }

    #[test]
    fn test_edit_buffer_backspace_at_start_is_noop() {
        let mut buf = EditBuffer::with_text("a");
        buf.left();
        assert!(!buf.backspace());
        assert_eq!(buf.text(), "a");
    }

    #[test]
    fn test_edit_buffer_clear() {
        let mut buf = EditBuffer::with_text("où");
        buf.clear();
        assert!(buf.is_empty());
        buf.insert('z');
        assert_eq!(buf.text(), "z");
    }
}
