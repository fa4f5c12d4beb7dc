//! Configuration Management
//!
//! Handles persistent preferences for the satadmin command line. The auth
//! token is never stored here; it is always supplied per invocation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Last used admin API base URL
    #[serde(default)]
    pub base_url: Option<String>,
    /// Preferred output format ("json", "yaml" or "text")
    #[serde(default)]
    pub output: Option<String>,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("satadmin").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }

    /// Get effective base URL (CLI/env > config)
    pub fn effective_base_url(&self, cli: Option<&str>) -> Option<String> {
        cli.map(|s| s.to_string())
            .or_else(|| self.base_url.clone())
            .filter(|s| !s.is_empty())
    }

    /// Remember the base URL and save, skipping the write when unchanged
    pub fn set_base_url(&mut self, base_url: &str) -> Result<()> {
        if self.base_url.as_deref() == Some(base_url) {
            return Ok(());
        }
        self.base_url = Some(base_url.to_string());
        self.save()
    }
}
