//! TUI Module - the interactive form
//!
//! - event_loop: entry point, terminal lifecycle, and event handling
//! - render: UI drawing functions and the light/dark palettes
//! - state: per-run TUI state on top of the shared session

mod event_loop;
mod render;
mod state;

pub use event_loop::run;
pub use event_loop::TuiMessage;
