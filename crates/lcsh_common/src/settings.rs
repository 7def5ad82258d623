//! Settings store
//!
//! Durable key-value settings behind an explicit interface so the session
//! manager never touches storage directly. The file-backed store keeps a
//! TOML file at ~/.config/lcshgen/config.toml; the in-memory store backs
//! tests and environments without a home directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings key for the raw DeepSeek API key.
pub const KEY_API_KEY: &str = "api_key";

/// Settings key for the dark mode flag ("true" / "false").
pub const KEY_DARK_MODE: &str = "dark_mode";

/// String-valued key-value settings, read at startup and written on every
/// change to a persisted field.
pub trait SettingsStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// On-disk settings shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    dark_mode: Option<bool>,
}

/// TOML-backed settings store.
pub struct TomlSettingsStore {
    path: PathBuf,
    settings: SettingsFile,
}

impl TomlSettingsStore {
    /// Default config path: ~/.config/lcshgen/config.toml
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Cannot determine config directory")?;
        Ok(config_dir.join("lcshgen").join("config.toml"))
    }

    /// Open the store at the default path.
    pub fn open() -> Result<Self> {
        Ok(Self::open_at(Self::default_path()?))
    }

    /// Open the store at an explicit path. A missing or unreadable file
    /// degrades to empty settings; it is recreated on the next `set`.
    pub fn open_at(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = Self::read_file(&path).unwrap_or_else(|e| {
            tracing::debug!("No usable settings at {}: {}", path.display(), e);
            SettingsFile::default()
        });
        Self { path, settings }
    }

    fn read_file(path: &Path) -> Result<SettingsFile> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn write_file(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let toml_string =
            toml::to_string_pretty(&self.settings).context("Failed to serialize settings")?;

        fs::write(&self.path, toml_string)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        Ok(())
    }
}

impl SettingsStore for TomlSettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        match key {
            KEY_API_KEY => self.settings.api_key.clone(),
            KEY_DARK_MODE => self.settings.dark_mode.map(|b| b.to_string()),
            _ => None,
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            KEY_API_KEY => self.settings.api_key = Some(value.to_string()),
            KEY_DARK_MODE => self.settings.dark_mode = Some(value == "true"),
            _ => anyhow::bail!("Unknown settings key: '{}'", key),
        }
        self.write_file()
    }
}

/// In-memory settings store for tests.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: HashMap<String, String>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded store, for hydration tests.
    pub fn with_values(values: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemorySettingsStore::new();
        assert_eq!(store.get(KEY_API_KEY), None);

        store.set(KEY_API_KEY, "sk-test").unwrap();
        assert_eq!(store.get(KEY_API_KEY), Some("sk-test".to_string()));
    }

    #[test]
    fn test_toml_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut store = TomlSettingsStore::open_at(&path);
        store.set(KEY_API_KEY, "sk-abc123").unwrap();
        store.set(KEY_DARK_MODE, "true").unwrap();

        // Reopen and verify persistence
        let reopened = TomlSettingsStore::open_at(&path);
        assert_eq!(reopened.get(KEY_API_KEY), Some("sk-abc123".to_string()));
        assert_eq!(reopened.get(KEY_DARK_MODE), Some("true".to_string()));
    }

    #[test]
    fn test_toml_store_missing_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlSettingsStore::open_at(dir.path().join("nope.toml"));
        assert_eq!(store.get(KEY_API_KEY), None);
        assert_eq!(store.get(KEY_DARK_MODE), None);
    }

    #[test]
    fn test_toml_store_corrupt_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "not [valid toml").unwrap();

        let store = TomlSettingsStore::open_at(&path);
        assert_eq!(store.get(KEY_API_KEY), None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TomlSettingsStore::open_at(dir.path().join("config.toml"));
        assert!(store.set("favorite_color", "blue").is_err());
    }

    #[test]
    fn test_dark_mode_stringly_typed() {
        let mut store = MemorySettingsStore::new();
        store.set(KEY_DARK_MODE, "false").unwrap();
        assert_eq!(store.get(KEY_DARK_MODE), Some("false".to_string()));
    }
}
