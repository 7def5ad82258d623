//! LCSH Control - CLI and TUI client for the LCSH Generator
//!
//! One-shot `suggest` for scripting, `config` for the persisted settings,
//! and an interactive TUI form for the full copy-to-clipboard workflow.

pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod tui;
