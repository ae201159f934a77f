//! User-level configuration for archscan
//!
//! Persisted settings live at `~/.config/archscan/config.toml`. Loading
//! is explicit at startup and the result is injected into the pipeline;
//! nothing reads this ambiently. CLI flags override file settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Toggles for the optional analysis collaborators.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Run npm audit during analysis.
    #[serde(default = "default_true")]
    pub audit: bool,
    /// Collect git change hotspots.
    #[serde(default = "default_true")]
    pub git: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            audit: true,
            git: true,
        }
    }
}

impl Settings {
    /// Load settings from the user config file. A missing or unreadable
    /// file yields defaults; a present but invalid file is an error so a
    /// typo never silently reverts behavior.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let settings = toml::from_str(&content)
            .with_context(|| format!("invalid config at {}", path.display()))?;
        debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Write settings back to the user config file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path().context("no user config directory on this platform")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write config at {}", path.display()))?;
        Ok(())
    }

    /// Path of the user config file.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("archscan").join("config.toml"))
    }
}
