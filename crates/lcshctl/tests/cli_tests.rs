//! CLI argument-level behavior

use clap::Parser;
use lcshctl::cli::{Cli, Commands};

#[test]
fn bare_invocation_defaults_to_tui() {
    let cli = Cli::try_parse_from(["lcshctl"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn suggest_accepts_positional_text() {
    let cli = Cli::try_parse_from(["lcshctl", "suggest", "A history of Rome"]).unwrap();
    match cli.command {
        Some(Commands::Suggest { text, file, json, .. }) => {
            assert_eq!(text.as_deref(), Some("A history of Rome"));
            assert!(file.is_none());
            assert!(!json);
        }
        _ => panic!("expected suggest"),
    }
}

#[test]
fn suggest_accepts_file_and_json_flags() {
    let cli =
        Cli::try_parse_from(["lcshctl", "suggest", "--file", "input.txt", "--json"]).unwrap();
    match cli.command {
        Some(Commands::Suggest { text, file, json, .. }) => {
            assert!(text.is_none());
            assert_eq!(file.unwrap().to_str(), Some("input.txt"));
            assert!(json);
        }
        _ => panic!("expected suggest"),
    }
}

#[test]
fn suggest_accepts_api_key_flag() {
    let cli =
        Cli::try_parse_from(["lcshctl", "suggest", "text", "--api-key", "sk-abc"]).unwrap();
    match cli.command {
        Some(Commands::Suggest { api_key, .. }) => {
            assert_eq!(api_key.as_deref(), Some("sk-abc"));
        }
        _ => panic!("expected suggest"),
    }
}

#[test]
fn config_flags_parse() {
    let cli = Cli::try_parse_from([
        "lcshctl", "config", "--set-key", "sk-abc", "--dark-mode", "off",
    ])
    .unwrap();
    match cli.command {
        Some(Commands::Config { set_key, dark_mode }) => {
            assert_eq!(set_key.as_deref(), Some("sk-abc"));
            assert_eq!(dark_mode.as_deref(), Some("off"));
        }
        _ => panic!("expected config"),
    }
}

#[test]
fn unknown_subcommand_rejected() {
    assert!(Cli::try_parse_from(["lcshctl", "frobnicate"]).is_err());
}
