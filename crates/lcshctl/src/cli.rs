//! CLI - Command-line argument parsing
//!
//! Keeps argument parsing separate from execution logic.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// LCSH Generator CLI
#[derive(Parser)]
#[command(name = "lcshctl")]
#[command(about = "Generate Library of Congress Subject Headings with AI", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Subcommand (if not provided, starts the interactive TUI)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Suggest headings for a piece of text (one-shot)
    Suggest {
        /// Text to analyze (reads stdin when neither this nor --file is given)
        text: Option<String>,

        /// Read the text from a file instead
        #[arg(long)]
        file: Option<PathBuf>,

        /// DeepSeek API key (falls back to $LCSHGEN_API_KEY, then the saved key)
        #[arg(long)]
        api_key: Option<String>,

        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Show or change persisted settings
    Config {
        /// Save a DeepSeek API key
        #[arg(long)]
        set_key: Option<String>,

        /// Set the theme ("on" = dark, "off" = light)
        #[arg(long)]
        dark_mode: Option<String>,
    },

    /// Launch the interactive TUI form
    Tui,
}
