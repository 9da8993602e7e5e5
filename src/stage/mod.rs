//! Binding staging.
//!
//! UI toolkit packages ship small backend integration sources ("bindings")
//! under `res/bindings/` in their installation. Staging selects the ones
//! matching the supported backends and copies them flat into the project's
//! `bindings/` directory, where the native build compiles them as if they
//! were part of the source tree.
//!
//! Staging is idempotent: re-running with an unchanged resolved package
//! leaves the staging directory byte-identical. Files staged by earlier
//! pattern sets are not removed.

use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;

use glob::Pattern;
use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::ResolvedPackage;
use crate::layout::Layout;
use crate::util::fs::files_matching;

/// Default UI toolkit package whose bindings are staged.
pub const DEFAULT_TOOLKIT: &str = "imgui";

/// Default binding patterns, one per supported backend:
/// windowing (GLFW) and rendering (OpenGL 3).
pub const DEFAULT_PATTERNS: &[&str] = &["*glfw*", "*opengl3*"];

/// Subdirectory of a package installation holding binding sources.
const BINDINGS_SUBDIR: &str = "res/bindings";

/// Immutable staging configuration, injected at pipeline start.
#[derive(Debug, Clone)]
pub struct StageConfig {
    toolkit: String,
    patterns: Vec<Pattern>,
}

impl StageConfig {
    /// Build a config from a toolkit name and glob patterns.
    pub fn new(toolkit: impl Into<String>, patterns: &[&str]) -> Result<Self, glob::PatternError> {
        let patterns = patterns
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StageConfig {
            toolkit: toolkit.into(),
            patterns,
        })
    }

    /// The name of the toolkit requirement whose bindings are staged.
    pub fn toolkit(&self) -> &str {
        &self.toolkit
    }

    /// Patterns in declaration order.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }
}

impl Default for StageConfig {
    fn default() -> Self {
        // Patterns are static and known-valid; unwrap cannot fire here.
        StageConfig::new(DEFAULT_TOOLKIT, DEFAULT_PATTERNS)
            .expect("default binding patterns are valid")
    }
}

/// Error staging binding sources.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum StageError {
    #[error("package `{package}` has no bindings directory (expected {expected})")]
    #[diagnostic(
        code(gantry::stage::source_missing),
        help("The resolved toolkit version likely predates shipped backend bindings")
    )]
    SourceMissing { package: String, expected: PathBuf },

    #[error("failed to enumerate bindings under {path}")]
    #[diagnostic(code(gantry::stage::enumerate))]
    Enumerate {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to copy {from} to {to}")]
    #[diagnostic(code(gantry::stage::copy))]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The set of files staged by one invocation. Recomputed every run,
/// never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedFileSet {
    names: Vec<String>,
}

impl StagedFileSet {
    /// Staged file names, sorted and deduplicated.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of distinct staged files.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing was staged.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Stage the toolkit package's binding sources into the layout's
/// staging directory.
///
/// Patterns are applied in declaration order; matching is on the file
/// name only, recursively below the bindings directory. Matches are
/// copied flat, overwriting same-named files. A pattern matching zero
/// files is not an error.
pub fn stage(
    toolkit: &ResolvedPackage,
    patterns: &[Pattern],
    layout: &Layout,
) -> Result<StagedFileSet, StageError> {
    let source_dir = toolkit.install_path().join(BINDINGS_SUBDIR);
    if !source_dir.is_dir() {
        return Err(StageError::SourceMissing {
            package: toolkit.to_string(),
            expected: source_dir,
        });
    }

    let mut staged = BTreeSet::new();

    for pattern in patterns {
        let matches =
            files_matching(&source_dir, pattern).map_err(|source| StageError::Enumerate {
                path: source_dir.clone(),
                source,
            })?;

        if matches.is_empty() {
            tracing::debug!("pattern `{}` matched no bindings", pattern);
            continue;
        }

        for file in matches {
            // files_matching only yields files, which always carry a name
            let name = file
                .file_name()
                .expect("matched file has a name")
                .to_string_lossy()
                .into_owned();
            let dest = layout.staging_dir().join(&name);

            std::fs::copy(&file, &dest).map_err(|source| StageError::Copy {
                from: file.clone(),
                to: dest.clone(),
                source,
            })?;

            tracing::debug!("staged {} -> {}", file.display(), dest.display());
            staged.insert(name);
        }
    }

    Ok(StagedFileSet {
        names: staged.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::Path;

    use semver::Version;
    use tempfile::TempDir;

    use crate::layout::Profile;

    fn toolkit_with_bindings(root: &Path, files: &[&str]) -> ResolvedPackage {
        let install = root.join("imgui/1.90.5");
        let bindings = install.join("res/bindings");
        fs::create_dir_all(&bindings).unwrap();
        for file in files {
            fs::write(bindings.join(file), format!("// {}", file)).unwrap();
        }
        ResolvedPackage::new(
            "imgui",
            Version::new(1, 90, 5),
            install,
            BTreeMap::new(),
        )
    }

    fn patterns(raw: &[&str]) -> Vec<Pattern> {
        raw.iter().map(|p| Pattern::new(p).unwrap()).collect()
    }

    fn dir_contents(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_stages_only_matching_files() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("project");
        fs::create_dir_all(&project).unwrap();

        let toolkit = toolkit_with_bindings(
            tmp.path(),
            &[
                "imgui_impl_glfw.cpp",
                "imgui_impl_glfw.h",
                "imgui_impl_opengl3.cpp",
                "imgui_impl_sdl2.cpp",
            ],
        );
        let layout = Layout::plan(&project, Profile::Debug).unwrap();

        let staged = stage(&toolkit, &patterns(&["*glfw*", "*opengl3*"]), &layout).unwrap();

        assert_eq!(
            staged.names(),
            [
                "imgui_impl_glfw.cpp",
                "imgui_impl_glfw.h",
                "imgui_impl_opengl3.cpp"
            ]
        );
        assert_eq!(dir_contents(layout.staging_dir()), staged.names());
    }

    #[test]
    fn test_staging_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("project");
        fs::create_dir_all(&project).unwrap();

        let toolkit =
            toolkit_with_bindings(tmp.path(), &["imgui_impl_glfw.cpp", "imgui_impl_opengl3.cpp"]);
        let layout = Layout::plan(&project, Profile::Debug).unwrap();
        let pats = patterns(&["*glfw*", "*opengl3*"]);

        let first = stage(&toolkit, &pats, &layout).unwrap();
        let snapshot: Vec<_> = first
            .names()
            .iter()
            .map(|n| fs::read(layout.staging_dir().join(n)).unwrap())
            .collect();

        let second = stage(&toolkit, &pats, &layout).unwrap();
        assert_eq!(first, second);

        for (name, bytes) in second.names().iter().zip(snapshot) {
            assert_eq!(fs::read(layout.staging_dir().join(name)).unwrap(), bytes);
        }
    }

    #[test]
    fn test_zero_matches_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("project");
        fs::create_dir_all(&project).unwrap();

        let toolkit = toolkit_with_bindings(tmp.path(), &[]);
        let layout = Layout::plan(&project, Profile::Debug).unwrap();

        let staged = stage(&toolkit, &patterns(&["*glfw*"]), &layout).unwrap();
        assert!(staged.is_empty());
    }

    #[test]
    fn test_missing_bindings_dir_fails_without_copying() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("project");
        fs::create_dir_all(&project).unwrap();

        let install = tmp.path().join("imgui/0.9.0");
        fs::create_dir_all(&install).unwrap();
        let toolkit = ResolvedPackage::new(
            "imgui",
            Version::new(0, 9, 0),
            install,
            BTreeMap::new(),
        );
        let layout = Layout::plan(&project, Profile::Debug).unwrap();

        let err = stage(&toolkit, &patterns(&["*glfw*"]), &layout).unwrap_err();
        assert!(matches!(err, StageError::SourceMissing { .. }));
        assert!(dir_contents(layout.staging_dir()).is_empty());
    }

    #[test]
    fn test_stale_files_are_left_in_place() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("project");
        fs::create_dir_all(&project).unwrap();

        let toolkit = toolkit_with_bindings(tmp.path(), &["imgui_impl_glfw.cpp"]);
        let layout = Layout::plan(&project, Profile::Debug).unwrap();

        // A leftover from a previous pattern set
        fs::write(layout.staging_dir().join("imgui_impl_sdl2.cpp"), "stale").unwrap();

        let staged = stage(&toolkit, &patterns(&["*glfw*"]), &layout).unwrap();
        assert_eq!(staged.names(), ["imgui_impl_glfw.cpp"]);
        assert!(layout.staging_dir().join("imgui_impl_sdl2.cpp").exists());
    }

    #[test]
    fn test_overwrites_existing_staged_file() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("project");
        fs::create_dir_all(&project).unwrap();

        let toolkit = toolkit_with_bindings(tmp.path(), &["imgui_impl_glfw.cpp"]);
        let layout = Layout::plan(&project, Profile::Debug).unwrap();
        fs::write(layout.staging_dir().join("imgui_impl_glfw.cpp"), "old").unwrap();

        stage(&toolkit, &patterns(&["*glfw*"]), &layout).unwrap();
        let contents =
            fs::read_to_string(layout.staging_dir().join("imgui_impl_glfw.cpp")).unwrap();
        assert_eq!(contents, "// imgui_impl_glfw.cpp");
    }

    #[test]
    fn test_default_config() {
        let config = StageConfig::default();
        assert_eq!(config.toolkit(), "imgui");
        assert_eq!(config.patterns().len(), 2);
    }
}
