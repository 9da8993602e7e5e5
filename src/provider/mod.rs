//! Package provider abstraction.
//!
//! A provider turns a declared requirement into an installed package on
//! disk. It is injected as a capability so tests can substitute a canned
//! provider without performing real installation.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::{RequirementSpec, ResolvedPackage};

pub mod store;

pub use store::StoreProvider;

/// Error from a package provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("package `{name}` not found matching `{requirement}`")]
    NotFound {
        name: String,
        requirement: String,
        searched: PathBuf,
        available: Vec<String>,
    },

    #[error("installer failed for `{spec}` (exit code {code:?})")]
    InstallerFailed {
        spec: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("invalid package metadata at {path}")]
    InvalidMetadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read package store at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A source of installed packages.
///
/// `install` must hand back a stable, already-extracted installation
/// directory. It may trigger external installation (network/disk I/O) as
/// a side effect, but once a package is installed the lookup is pure.
pub trait PackageProvider {
    /// Obtain an installed package satisfying the requirement.
    fn install(&self, spec: &RequirementSpec) -> Result<ResolvedPackage, ProviderError>;

    /// Provider name for display and error reporting.
    fn source_name(&self) -> &str;
}
