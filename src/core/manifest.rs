//! Gantry.toml manifest parsing and schema.
//!
//! The manifest is the central configuration file for a gantry project:
//!
//! ```toml
//! [project]
//! name = "sandbox"
//! version = "0.1.0"
//!
//! requirements = [
//!     "imgui/1.90.5",
//!     "glfw/3.4",
//! ]
//!
//! [build]
//! profile = "debug"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::requirement::RequirementSpec;
use crate::util::fs::read_to_string;

/// Project metadata from the `[project]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Project name
    pub name: String,

    /// Project version
    pub version: String,

    /// Project description
    #[serde(default)]
    pub description: Option<String>,
}

/// Manifest-level build configuration from the `[build]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestBuildConfig {
    /// Default build profile for this project ("debug" or "release")
    pub profile: Option<String>,
}

/// Raw schema as it appears on disk, before requirement validation.
#[derive(Debug, Deserialize)]
struct TomlManifest {
    project: ProjectMetadata,

    #[serde(default)]
    requirements: Vec<String>,

    #[serde(default)]
    build: ManifestBuildConfig,
}

/// The parsed Gantry.toml manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Project metadata
    pub project: ProjectMetadata,

    /// Declared requirements, in declaration order
    pub requirements: Vec<RequirementSpec>,

    /// Build configuration
    pub build: ManifestBuildConfig,

    /// The directory containing this manifest
    pub manifest_dir: PathBuf,
}

impl Manifest {
    /// Load and validate a manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;
        let raw: TomlManifest = toml::from_str(&contents)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))?;

        let requirements = raw
            .requirements
            .iter()
            .map(|entry| RequirementSpec::parse(entry))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("invalid requirements in {}", path.display()))?;

        let manifest_dir = path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Manifest {
            project: raw.project,
            requirements,
            build: raw.build,
            manifest_dir,
        })
    }

    /// The project root directory (where the manifest lives).
    pub fn root(&self) -> &Path {
        &self.manifest_dir
    }
}
