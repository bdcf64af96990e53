//! ZQLZ Settings System
//!
//! Persists wizard settings as a single JSON document made of named
//! sections. Each wizard page owns one section and decides its own shape;
//! this crate only reads, replaces and writes whole sections.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod settings_file;

pub use settings_file::*;

/// On-disk shape of the settings document
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
struct SettingsDocument {
    sections: serde_json::Map<String, serde_json::Value>,
}

/// Section-based settings store backed by a JSON file
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    document: SettingsDocument,
}

impl SettingsStore {
    /// Open the store at the default location under the zqlz config directory
    pub fn open_default() -> Result<Self> {
        ensure_directories()?;
        Self::open(transfer_settings_file()?)
    }

    /// Open the store at `path`. A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "settings file not found, starting empty");
            return Ok(Self {
                path,
                document: SettingsDocument::default(),
            });
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        let document = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings JSON in {:?}", path))?;
        Ok(Self { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.document.sections.contains_key(name)
    }

    /// Deserialize a section. Returns `Ok(None)` when the section is absent.
    pub fn section<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        match self.document.sections.get(name) {
            Some(value) => serde_json::from_value(value.clone())
                .with_context(|| format!("Failed to parse settings section '{}'", name))
                .map(Some),
            None => Ok(None),
        }
    }

    /// Deserialize a section, falling back to `T::default()` when absent
    pub fn section_or_default<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T> {
        Ok(self.section(name)?.unwrap_or_default())
    }

    /// Replace a section in memory. Call [`SettingsStore::save`] to persist.
    pub fn set_section<T: Serialize>(&mut self, name: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)
            .with_context(|| format!("Failed to serialize settings section '{}'", name))?;
        self.document.sections.insert(name.to_string(), value);
        Ok(())
    }

    pub fn remove_section(&mut self, name: &str) -> bool {
        self.document.sections.remove(name).is_some()
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.document)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write settings to {:?}", self.path))?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}
