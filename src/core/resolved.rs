//! Resolved packages - the output of requirement resolution.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use semver::Version;

/// A requirement resolved to a concrete installation on disk.
///
/// Produced by the resolver, read-only to downstream consumers. The
/// installation path exists and is readable at the time it is handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackage {
    name: String,
    version: Version,
    install_path: PathBuf,
    metadata: BTreeMap<String, String>,
}

impl ResolvedPackage {
    /// Create a resolved package handle.
    pub fn new(
        name: impl Into<String>,
        version: Version,
        install_path: PathBuf,
        metadata: BTreeMap<String, String>,
    ) -> Self {
        ResolvedPackage {
            name: name.into(),
            version,
            install_path,
            metadata,
        }
    }

    /// Package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Concrete resolved version.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Root of the extracted installation.
    pub fn install_path(&self) -> &Path {
        &self.install_path
    }

    /// Provider-supplied metadata (free-form key/value).
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }
}

impl fmt::Display for ResolvedPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}", self.name, self.version)
    }
}

/// The full set of resolved packages for one invocation, in declaration
/// order, with by-name lookup.
#[derive(Debug, Clone, Default)]
pub struct ResolvedSet {
    packages: Vec<ResolvedPackage>,
}

impl ResolvedSet {
    /// Create an empty set.
    pub fn new() -> Self {
        ResolvedSet {
            packages: Vec::new(),
        }
    }

    /// Append a resolved package.
    pub fn push(&mut self, package: ResolvedPackage) {
        self.packages.push(package);
    }

    /// Packages in declaration order.
    pub fn packages(&self) -> &[ResolvedPackage] {
        &self.packages
    }

    /// Look up a package by name.
    pub fn get(&self, name: &str) -> Option<&ResolvedPackage> {
        self.packages.iter().find(|p| p.name() == name)
    }

    /// Number of resolved packages.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
