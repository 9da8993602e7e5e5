//! Package store provider.
//!
//! Reads packages from an on-disk store rather than parsing any CLI
//! output. The store is laid out by the external installer as:
//!
//! ```text
//! <store>/
//! └── <name>/
//!     └── <version>/
//!         ├── pkginfo.json      # optional flat key/value metadata
//!         ├── include/
//!         ├── lib/
//!         └── res/bindings/     # UI toolkits: backend integration sources
//! ```
//!
//! When no installed version satisfies a requirement and an installer
//! command is configured, the installer is invoked once
//! (`<installer> install <name>/<req>`) and the store re-scanned.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use semver::Version;

use crate::core::{RequirementSpec, ResolvedPackage};
use crate::provider::{PackageProvider, ProviderError};
use crate::util::process::ProcessBuilder;
use crate::util::shell::Shell;

/// Name of the optional per-package metadata file.
const METADATA_FILE: &str = "pkginfo.json";

/// Store-backed package provider.
pub struct StoreProvider {
    root: PathBuf,
    installer: Option<String>,
    shell: Shell,
}

impl StoreProvider {
    /// Create a provider over the given store root.
    pub fn new(root: PathBuf) -> Self {
        StoreProvider {
            root,
            installer: None,
            shell: Shell::new().quiet(),
        }
    }

    /// Configure an external installer command to run on store misses.
    pub fn with_installer(mut self, installer: Option<String>) -> Self {
        self.installer = installer;
        self
    }

    /// Attach a shell for progress output during installer runs.
    pub fn with_shell(mut self, shell: Shell) -> Self {
        self.shell = shell;
        self
    }

    /// The store root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Enumerate installed versions of a package, ascending.
    fn installed_versions(&self, name: &str) -> Result<Vec<Version>, ProviderError> {
        let package_dir = self.root.join(name);
        if !package_dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&package_dir).map_err(|source| ProviderError::Io {
            path: package_dir.clone(),
            source,
        })?;

        let mut versions = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ProviderError::Io {
                path: package_dir.clone(),
                source,
            })?;
            if !entry.path().is_dir() {
                continue;
            }
            let dir_name = entry.file_name().to_string_lossy().into_owned();
            match Version::parse(&dir_name) {
                Ok(version) => versions.push(version),
                Err(_) => {
                    tracing::debug!("ignoring non-version store entry: {}/{}", name, dir_name);
                }
            }
        }

        versions.sort();
        Ok(versions)
    }

    /// Pick the highest installed version satisfying the requirement.
    fn best_match(&self, spec: &RequirementSpec) -> Result<Option<Version>, ProviderError> {
        let versions = self.installed_versions(spec.name())?;
        Ok(versions
            .into_iter()
            .rev()
            .find(|v| spec.req().matches(v)))
    }

    /// Invoke the external installer for a requirement.
    fn run_installer(&self, installer: &str, spec: &RequirementSpec) -> Result<(), ProviderError> {
        let mut parts = installer.split_whitespace();
        let Some(program) = parts.next() else {
            return Ok(());
        };

        tracing::info!("Installing {} via `{}`", spec, installer);
        let spinner = self.shell.spinner(format!("installing {}", spec));

        let result = ProcessBuilder::new(program)
            .args(parts)
            .arg("install")
            .arg(spec.raw())
            .exec();

        spinner.finish_and_clear();

        let output = result.map_err(|e| ProviderError::InstallerFailed {
            spec: spec.raw().to_string(),
            code: None,
            stderr: format!("{:#}", e),
        })?;

        if !output.status.success() {
            return Err(ProviderError::InstallerFailed {
                spec: spec.raw().to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(())
    }

    /// Read optional pkginfo.json metadata from an installation.
    fn read_metadata(&self, install_path: &Path) -> Result<BTreeMap<String, String>, ProviderError> {
        let path = install_path.join(METADATA_FILE);
        if !path.is_file() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&path).map_err(|source| ProviderError::Io {
            path: path.clone(),
            source,
        })?;

        serde_json::from_str(&contents)
            .map_err(|source| ProviderError::InvalidMetadata { path, source })
    }

    fn resolve_installed(
        &self,
        spec: &RequirementSpec,
        version: Version,
    ) -> Result<ResolvedPackage, ProviderError> {
        let install_path = self.root.join(spec.name()).join(version.to_string());
        let metadata = self.read_metadata(&install_path)?;
        Ok(ResolvedPackage::new(
            spec.name(),
            version,
            install_path,
            metadata,
        ))
    }
}

impl PackageProvider for StoreProvider {
    fn install(&self, spec: &RequirementSpec) -> Result<ResolvedPackage, ProviderError> {
        if let Some(version) = self.best_match(spec)? {
            return self.resolve_installed(spec, version);
        }

        // Store miss: one installer attempt, then a single re-scan.
        if let Some(installer) = self.installer.clone() {
            self.run_installer(&installer, spec)?;
            if let Some(version) = self.best_match(spec)? {
                return self.resolve_installed(spec, version);
            }
        }

        let available = self
            .installed_versions(spec.name())?
            .into_iter()
            .map(|v| v.to_string())
            .collect();

        Err(ProviderError::NotFound {
            name: spec.name().to_string(),
            requirement: spec.req().to_string(),
            searched: self.root.join(spec.name()),
            available,
        })
    }

    fn source_name(&self) -> &str {
        "store"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn add_package(store: &Path, name: &str, version: &str) -> PathBuf {
        let dir = store.join(name).join(version);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_resolves_highest_matching_version() {
        let tmp = TempDir::new().unwrap();
        add_package(tmp.path(), "glfw", "3.3.8");
        add_package(tmp.path(), "glfw", "3.4.0");
        add_package(tmp.path(), "glfw", "4.0.0");

        let provider = StoreProvider::new(tmp.path().to_path_buf());
        let spec = RequirementSpec::parse("glfw/3.4").unwrap();

        let resolved = provider.install(&spec).unwrap();
        assert_eq!(resolved.version(), &Version::new(3, 4, 0));
        assert!(resolved.install_path().is_dir());
    }

    #[test]
    fn test_not_found_reports_available_versions() {
        let tmp = TempDir::new().unwrap();
        add_package(tmp.path(), "imgui", "1.89.0");

        let provider = StoreProvider::new(tmp.path().to_path_buf());
        let spec = RequirementSpec::parse("imgui/1.90.5").unwrap();

        match provider.install(&spec) {
            Err(ProviderError::NotFound { available, .. }) => {
                assert_eq!(available, ["1.89.0"]);
            }
            other => panic!("expected NotFound, got {:?}", other.map(|p| p.to_string())),
        }
    }

    #[test]
    fn test_reads_metadata_file() {
        let tmp = TempDir::new().unwrap();
        let dir = add_package(tmp.path(), "imgui", "1.90.5");
        fs::write(
            dir.join(METADATA_FILE),
            r#"{"license": "MIT", "homepage": "https://github.com/ocornut/imgui"}"#,
        )
        .unwrap();

        let provider = StoreProvider::new(tmp.path().to_path_buf());
        let spec = RequirementSpec::parse("imgui/1.90.5").unwrap();

        let resolved = provider.install(&spec).unwrap();
        assert_eq!(resolved.metadata().get("license").unwrap(), "MIT");
    }

    #[test]
    fn test_malformed_metadata_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let dir = add_package(tmp.path(), "imgui", "1.90.5");
        fs::write(dir.join(METADATA_FILE), "not json").unwrap();

        let provider = StoreProvider::new(tmp.path().to_path_buf());
        let spec = RequirementSpec::parse("imgui/1.90.5").unwrap();

        assert!(matches!(
            provider.install(&spec),
            Err(ProviderError::InvalidMetadata { .. })
        ));
    }

    #[test]
    fn test_installer_failure_surfaces_exit_code() {
        let tmp = TempDir::new().unwrap();

        let provider = StoreProvider::new(tmp.path().join("store"))
            .with_installer(Some("false".to_string()));
        let spec = RequirementSpec::parse("imgui/1.90.5").unwrap();

        match provider.install(&spec) {
            Err(ProviderError::InstallerFailed { code, .. }) => {
                assert_eq!(code, Some(1));
            }
            other => panic!("expected InstallerFailed, got {:?}", other.err()),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_installer_populates_store() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let store = tmp.path().join("store");
        fs::create_dir_all(&store).unwrap();

        // Fake installer that drops the requested package into the store.
        let script = tmp.path().join("fake-installer.sh");
        fs::write(
            &script,
            format!(
                "#!/bin/sh\nmkdir -p \"{}/imgui/1.90.5\"\n",
                store.display()
            ),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let provider = StoreProvider::new(store)
            .with_installer(Some(script.display().to_string()));
        let spec = RequirementSpec::parse("imgui/1.90.5").unwrap();

        let resolved = provider.install(&spec).unwrap();
        assert_eq!(resolved.version(), &Version::new(1, 90, 5));
    }

    #[test]
    fn test_ignores_non_version_directories() {
        let tmp = TempDir::new().unwrap();
        add_package(tmp.path(), "glfw", "3.4.0");
        fs::create_dir_all(tmp.path().join("glfw/.tmp-download")).unwrap();

        let provider = StoreProvider::new(tmp.path().to_path_buf());
        let versions = provider.installed_versions("glfw").unwrap();
        assert_eq!(versions, vec![Version::new(3, 4, 0)]);
    }
}
