//! Command handlers for the one-shot CLI surface

use anyhow::{Context, Result};
use lcsh_common::settings::{SettingsStore, KEY_API_KEY, KEY_DARK_MODE};
use lcsh_common::{DeepSeekClient, HeadingError, TomlSettingsStore, HEADINGS_KEY};
use std::io::Read;
use std::path::PathBuf;

/// Environment variable consulted before the saved key.
pub const API_KEY_ENV: &str = "LCSHGEN_API_KEY";

/// Suggest headings for the given text and print them.
pub async fn suggest(
    text: Option<String>,
    file: Option<PathBuf>,
    api_key: Option<String>,
    json: bool,
) -> Result<()> {
    let text = resolve_text(text, file)?;
    let api_key = resolve_api_key(api_key);

    if text.trim().is_empty() {
        anyhow::bail!("{}", HeadingError::EmptyText);
    }
    if api_key.trim().is_empty() {
        anyhow::bail!("{}", HeadingError::EmptyApiKey);
    }

    let client = DeepSeekClient::new();
    let headings = client.extract_headings(&text, &api_key).await?;

    if json {
        let out = serde_json::json!({ HEADINGS_KEY: headings });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for (i, heading) in headings.iter().enumerate() {
            println!("{}. {}", i + 1, heading);
        }
    }

    Ok(())
}

/// Show or change the persisted settings.
pub fn config(set_key: Option<String>, dark_mode: Option<String>) -> Result<()> {
    let mut store = TomlSettingsStore::open()?;

    let mut changed = false;

    if let Some(key) = set_key {
        store.set(KEY_API_KEY, &key).context("Failed to save API key")?;
        println!("API key saved");
        changed = true;
    }

    if let Some(mode) = dark_mode {
        let value = parse_dark_mode(&mode)?;
        store
            .set(KEY_DARK_MODE, value)
            .context("Failed to save dark mode")?;
        println!("Dark mode {}", if value == "true" { "on" } else { "off" });
        changed = true;
    }

    if !changed {
        let key = store.get(KEY_API_KEY);
        let dark = store.get(KEY_DARK_MODE).unwrap_or_else(|| "true".to_string());
        println!("api_key:   {}", redact_key(key.as_deref()));
        println!("dark_mode: {}", if dark == "true" { "on" } else { "off" });
    }

    Ok(())
}

/// Text resolution order: positional arg, then --file, then stdin.
pub fn resolve_text(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(t) = text {
        return Ok(t);
    }

    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read text from stdin")?;
    Ok(buf)
}

/// Key resolution order: --api-key, then $LCSHGEN_API_KEY, then the store.
fn resolve_api_key(api_key: Option<String>) -> String {
    if let Some(key) = api_key {
        return key;
    }

    if let Ok(key) = std::env::var(API_KEY_ENV) {
        return key;
    }

    TomlSettingsStore::open()
        .ok()
        .and_then(|s| s.get(KEY_API_KEY))
        .unwrap_or_default()
}

pub fn parse_dark_mode(mode: &str) -> Result<&'static str> {
    match mode.to_lowercase().as_str() {
        "on" | "true" | "dark" => Ok("true"),
        "off" | "false" | "light" => Ok("false"),
        _ => anyhow::bail!("Invalid dark mode: '{}'. Valid values: on, off", mode),
    }
}

/// Keep enough of the key to recognize it, nothing more.
pub fn redact_key(key: Option<&str>) -> String {
    let k = match key {
        Some(k) if !k.is_empty() => k,
        _ => return "(not set)".to_string(),
    };

    // Count in chars; keys are not guaranteed to be ASCII.
    let chars: Vec<char> = k.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_text_prefers_arg() {
        let text = resolve_text(Some("direct".to_string()), Some(PathBuf::from("/nope"))).unwrap();
        assert_eq!(text, "direct");
    }

    #[test]
    fn test_resolve_text_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "from the file").unwrap();

        let text = resolve_text(None, Some(f.path().to_path_buf())).unwrap();
        assert_eq!(text, "from the file");
    }

    #[test]
    fn test_resolve_text_missing_file_errors() {
        assert!(resolve_text(None, Some(PathBuf::from("/no/such/file"))).is_err());
    }

    #[test]
    fn test_parse_dark_mode() {
        assert_eq!(parse_dark_mode("on").unwrap(), "true");
        assert_eq!(parse_dark_mode("OFF").unwrap(), "false");
        assert_eq!(parse_dark_mode("light").unwrap(), "false");
        assert!(parse_dark_mode("maybe").is_err());
    }

    #[test]
    fn test_redact_key() {
        assert_eq!(redact_key(None), "(not set)");
        assert_eq!(redact_key(Some("")), "(not set)");
        assert_eq!(redact_key(Some("sk")), "****");
        assert_eq!(redact_key(Some("sk-abcdef1234")), "****1234");
    }

    #[test]
    fn test_redact_key_multibyte_tail() {
        assert_eq!(redact_key(Some("sk-été")), "****-été");
        assert_eq!(redact_key(Some("clé")), "****");
    }
}
