//! Global context for gantry operations.
//!
//! Provides centralized access to configuration paths, manifest discovery,
//! and the package store location.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};

use crate::util::config::Config;

/// Environment variable overriding the package store root.
pub const STORE_ENV: &str = "GANTRY_STORE";

/// Name of the project manifest file.
pub const MANIFEST_NAME: &str = "Gantry.toml";

/// Process-wide context: working directory and derived paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    cwd: PathBuf,
}

impl GlobalContext {
    /// Create a context rooted at the current working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to determine current directory")?;
        Ok(GlobalContext { cwd })
    }

    /// Create a context rooted at an explicit directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        Ok(GlobalContext { cwd })
    }

    /// The working directory this context is rooted at.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Find the project manifest by walking up from the working directory.
    pub fn find_manifest(&self) -> Result<PathBuf> {
        let mut dir = self.cwd.as_path();
        loop {
            let candidate = dir.join(MANIFEST_NAME);
            if candidate.is_file() {
                return Ok(candidate);
            }
            match dir.parent() {
                Some(parent) => dir = parent,
                None => anyhow::bail!(
                    "could not find `{}` in `{}` or any parent directory\n{}",
                    MANIFEST_NAME,
                    self.cwd.display(),
                    crate::util::diagnostic::suggestions::NO_MANIFEST
                ),
            }
        }
    }

    /// User-wide cache directory.
    pub fn cache_dir(&self) -> PathBuf {
        ProjectDirs::from("", "", "gantry")
            .map(|dirs| dirs.cache_dir().to_path_buf())
            .unwrap_or_else(|| self.cwd.join(".gantry-cache"))
    }

    /// Global configuration file path (`~/.gantry/config.toml`).
    pub fn config_path(&self) -> PathBuf {
        dirs_home()
            .map(|home| home.join(".gantry").join("config.toml"))
            .unwrap_or_else(|| self.cwd.join(".gantry").join("config.toml"))
    }

    /// Project-local configuration directory (`.gantry/` beside the manifest).
    pub fn project_gantry_dir(&self) -> PathBuf {
        self.cwd.join(".gantry")
    }

    /// Resolve the package store root: config override, then the
    /// GANTRY_STORE environment variable, then the user cache.
    pub fn store_dir(&self, config: &Config) -> PathBuf {
        if let Some(ref root) = config.store.root {
            return root.clone();
        }
        if let Ok(env_root) = std::env::var(STORE_ENV) {
            if !env_root.is_empty() {
                return PathBuf::from(env_root);
            }
        }
        self.cache_dir().join("store")
    }
}

fn dirs_home() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}
