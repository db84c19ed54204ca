//! Persisted provider settings — one serialized [`ProviderConfig`] blob.
//!
//! File format: pretty-printed camelCase JSON at `~/.lumo/provider.json`.
//! The store is the first link in the selector's fallback chain; whoever
//! writes through it must also invalidate the selector's cached client.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::ProviderConfig;
use crate::utils;

/// Filename of the persisted provider blob inside the data directory.
const SETTINGS_FILE: &str = "provider.json";

/// Reads and writes the single persisted [`ProviderConfig`].
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Create a store backed by the given file.
    ///
    /// `path` defaults to `~/.lumo/provider.json` if `None`.
    pub fn new(path: Option<PathBuf>) -> Self {
        let path = path.unwrap_or_else(|| utils::get_data_path().join(SETTINGS_FILE));
        SettingsStore { path }
    }

    /// Load the persisted config, if any.
    ///
    /// Missing or unparseable content yields `None` (with a warning), so a
    /// corrupt file degrades to the environment-default chain instead of
    /// blocking startup.
    pub fn get(&self) -> Option<ProviderConfig> {
        if !self.path.exists() {
            return None;
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                warn!("Failed to read settings file {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Failed to parse settings file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Persist the given config, creating parent directories as needed.
    pub fn set(&self, config: &ProviderConfig) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(config)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(&self.path, json)?;
        debug!("Provider settings saved to {}", self.path.display());
        Ok(())
    }

    /// Remove the persisted config. A missing file is not an error.
    pub fn clear(&self) -> std::io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Provider settings cleared at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Path of the backing file (for status output).
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
