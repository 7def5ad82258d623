//! LCSH Control - entry point

use anyhow::Result;
use clap::Parser;
use lcshctl::cli::{Cli, Commands};
use lcshctl::{commands, tui};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Quiet by default; RUST_LOG opts into more. Logs go to stderr so the
    // TUI's alternate screen on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Suggest {
            text,
            file,
            api_key,
            json,
        }) => commands::suggest(text, file, api_key, json).await,
        Some(Commands::Config { set_key, dark_mode }) => commands::config(set_key, dark_mode),
        Some(Commands::Tui) | None => tui::run().await,
    }
}
