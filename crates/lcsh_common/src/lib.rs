//! LCSH Common - Shared logic for the LCSH Generator
//!
//! Holds the pieces both the CLI and the TUI build on: the DeepSeek
//! completion client with tolerant heading extraction, the session state
//! manager, the settings store, and the error taxonomy.

pub mod deepseek;
pub mod error;
pub mod session;
pub mod settings;

pub use deepseek::{parse_heading_content, DeepSeekClient, HEADINGS_KEY};
pub use error::HeadingError;
pub use session::Session;
pub use settings::{MemorySettingsStore, SettingsStore, TomlSettingsStore};
