//! Best-effort clipboard access
//!
//! Copying is a convenience, never a failure mode: anything that goes
//! wrong is logged and swallowed.

use tracing::warn;

/// Copy `text` to the system clipboard. Returns whether it worked.
pub fn copy_text(text: &str) -> bool {
    let mut clipboard = match arboard::Clipboard::new() {
        Ok(c) => c,
        Err(e) => {
            warn!("Clipboard unavailable: {}", e);
            return false;
        }
    };

    match clipboard.set_text(text.to_string()) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to copy text: {}", e);
            false
        }
    }
}
