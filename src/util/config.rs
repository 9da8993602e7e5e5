//! Configuration file support.
//!
//! Two configuration file locations are supported:
//! - Global: `~/.gantry/config.toml` - User-wide defaults
//! - Project: `.gantry/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Gantry configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Package store settings
    pub store: StoreConfig,

    /// Build settings
    pub build: BuildConfig,
}

/// Package store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Package store root (overrides the GANTRY_STORE env var)
    pub root: Option<PathBuf>,

    /// External installer invoked when a requirement is absent from the
    /// store (e.g. an in-house package fetcher)
    pub installer: Option<String>,
}

/// Build settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Default build profile ("debug" or "release")
    pub profile: Option<String>,

    /// Path to the cmake binary
    pub cmake: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.store.root.is_some() {
            self.store.root = other.store.root;
        }
        if other.store.installer.is_some() {
            self.store.installer = other.store.installer;
        }
        if other.build.profile.is_some() {
            self.build.profile = other.build.profile;
        }
        if other.build.cmake.is_some() {
            self.build.cmake = other.build.cmake;
        }
    }
}

/// Load configuration from global and project paths, project winning.
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::load_or_default(global_path);
    let project = Config::load_or_default(project_path);
    config.merge(project);
    config
}
