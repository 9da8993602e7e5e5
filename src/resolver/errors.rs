//! Resolution error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::provider::ProviderError;
use crate::util::diagnostic::Diagnostic;

/// A declared requirement could not be obtained from the provider.
///
/// This aborts the entire pipeline: downstream staging needs a concrete
/// package path, so partial resolution is never allowed to proceed.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("could not resolve requirement `{requirement}`")]
#[diagnostic(
    code(gantry::resolve::unresolved),
    help("Check the package store contents, or configure an installer command")
)]
pub struct UnresolvedRequirement {
    /// The requirement as written in the manifest
    pub requirement: String,

    /// Provider name, for error reporting
    pub provider: String,

    #[source]
    pub source: ProviderError,
}

impl UnresolvedRequirement {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(format!(
            "could not resolve requirement `{}`",
            self.requirement
        ));

        match &self.source {
            ProviderError::NotFound {
                searched,
                available,
                ..
            } => {
                diag = diag.with_context(format!(
                    "provider `{}` searched {}",
                    self.provider,
                    searched.display()
                ));
                if available.is_empty() {
                    diag = diag.with_context("no versions installed".to_string());
                } else {
                    diag = diag
                        .with_context(format!("available versions: {}", available.join(", ")));
                }
                diag = diag
                    .with_suggestion(format!(
                        "Install a matching version of `{}` into the package store",
                        self.requirement
                    ))
                    .with_suggestion("Relax the version requirement in Gantry.toml".to_string());
            }

            ProviderError::InstallerFailed { code, stderr, .. } => {
                diag = diag.with_context(format!("installer exited with code {:?}", code));
                for line in stderr.lines().take(5) {
                    diag = diag.with_context(line.to_string());
                }
                diag = diag.with_suggestion(
                    "Re-run the installer by hand to inspect its output".to_string(),
                );
            }

            other => {
                diag = diag.with_context(format!("{}", other));
            }
        }

        diag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_not_found_diagnostic_lists_versions() {
        let err = UnresolvedRequirement {
            requirement: "imgui/1.90.5".to_string(),
            provider: "store".to_string(),
            source: ProviderError::NotFound {
                name: "imgui".to_string(),
                requirement: "^1.90.5".to_string(),
                searched: PathBuf::from("/store/imgui"),
                available: vec!["1.89.0".to_string()],
            },
        };

        let output = err.to_diagnostic().format(false);
        assert!(output.contains("could not resolve requirement `imgui/1.90.5`"));
        assert!(output.contains("available versions: 1.89.0"));
        assert!(output.contains("help: consider:"));
    }

    #[test]
    fn test_installer_failure_diagnostic_includes_stderr() {
        let err = UnresolvedRequirement {
            requirement: "glfw/3.4".to_string(),
            provider: "store".to_string(),
            source: ProviderError::InstallerFailed {
                spec: "glfw/3.4".to_string(),
                code: Some(2),
                stderr: "network unreachable\n".to_string(),
            },
        };

        let output = err.to_diagnostic().format(false);
        assert!(output.contains("installer exited with code Some(2)"));
        assert!(output.contains("network unreachable"));
    }
}
