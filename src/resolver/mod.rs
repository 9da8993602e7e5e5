//! Requirement resolution.
//!
//! Resolution walks the registry in declaration order and asks the
//! injected provider for each entry. Entries are independent, but
//! resolution is deliberately sequential: the first failure aborts with
//! full context, and no partial resolution reaches the staging step.

pub mod errors;

pub use errors::UnresolvedRequirement;

use crate::core::{RequirementRegistry, ResolvedSet};
use crate::provider::{PackageProvider, ProviderError};

/// Resolve every requirement in the registry, fail-fast.
pub fn resolve_all(
    registry: &RequirementRegistry,
    provider: &dyn PackageProvider,
) -> Result<ResolvedSet, UnresolvedRequirement> {
    let mut resolved = ResolvedSet::new();

    for spec in registry.iter() {
        tracing::debug!("resolving {}", spec);
        let package = provider
            .install(spec)
            .map_err(|source| UnresolvedRequirement {
                requirement: spec.raw().to_string(),
                provider: provider.source_name().to_string(),
                source,
            })?;

        // The stager depends on this path; refuse a provider handing back
        // a location that is already gone.
        if !package.install_path().exists() {
            return Err(UnresolvedRequirement {
                requirement: spec.raw().to_string(),
                provider: provider.source_name().to_string(),
                source: ProviderError::Io {
                    path: package.install_path().to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "installation path does not exist",
                    ),
                },
            });
        }

        tracing::info!("resolved {} -> {}", spec, package.install_path().display());
        resolved.push(package);
    }

    Ok(resolved)
}
