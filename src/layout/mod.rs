//! Canonical on-disk build layout.
//!
//! Every build invocation operates over the same fixed convention:
//!
//! ```text
//! <project root>/               # source root
//! ├── bindings/                 # staged toolkit bindings
//! └── build/<profile>/          # build root
//!     └── generators/           # generated descriptor files
//! ```
//!
//! Planning is a deterministic function of the project root and the
//! profile; it creates the directories it reports, so callers may assume
//! every returned path is usable.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

/// Build profile, mapped onto the CMake build type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    #[default]
    Debug,
    Release,
}

impl Profile {
    /// Directory name under `build/`.
    pub fn as_dir(&self) -> &'static str {
        match self {
            Profile::Debug => "debug",
            Profile::Release => "release",
        }
    }

    /// The CMAKE_BUILD_TYPE value for this profile.
    pub fn cmake_build_type(&self) -> &'static str {
        match self {
            Profile::Debug => "Debug",
            Profile::Release => "Release",
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(Profile::Debug),
            "release" => Ok(Profile::Release),
            other => Err(format!(
                "invalid profile `{}`; expected `debug` or `release`",
                other
            )),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_dir())
    }
}

/// Error preparing the on-disk layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to create layout directory {path}")]
    Creation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The set of canonical directories for one build invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    source_root: PathBuf,
    build_root: PathBuf,
    generators_dir: PathBuf,
    staging_dir: PathBuf,
}

impl Layout {
    /// Plan and create the layout for a project root and profile.
    pub fn plan(project_root: &Path, profile: Profile) -> Result<Layout, LayoutError> {
        let source_root = project_root.to_path_buf();
        let build_root = source_root.join("build").join(profile.as_dir());
        let generators_dir = build_root.join("generators");
        let staging_dir = source_root.join("bindings");

        for dir in [&build_root, &generators_dir, &staging_dir] {
            std::fs::create_dir_all(dir).map_err(|source| LayoutError::Creation {
                path: dir.clone(),
                source,
            })?;
        }

        Ok(Layout {
            source_root,
            build_root,
            generators_dir,
            staging_dir,
        })
    }

    /// The project source root.
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// The per-profile build root.
    pub fn build_root(&self) -> &Path {
        &self.build_root
    }

    /// Where generated descriptor files land.
    pub fn generators_dir(&self) -> &Path {
        &self.generators_dir
    }

    /// Where staged binding sources land (inside the source root).
    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_plan_creates_all_directories() {
        let tmp = TempDir::new().unwrap();
        let layout = Layout::plan(tmp.path(), Profile::Release).unwrap();

        assert_eq!(layout.source_root(), tmp.path());
        assert_eq!(layout.build_root(), tmp.path().join("build/release"));
        assert_eq!(
            layout.generators_dir(),
            tmp.path().join("build/release/generators")
        );
        assert_eq!(layout.staging_dir(), tmp.path().join("bindings"));

        assert!(layout.build_root().is_dir());
        assert!(layout.generators_dir().is_dir());
        assert!(layout.staging_dir().is_dir());
    }

    #[test]
    fn test_plan_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let first = Layout::plan(tmp.path(), Profile::Debug).unwrap();
        let second = Layout::plan(tmp.path(), Profile::Debug).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_staging_dir_is_inside_source_root() {
        let tmp = TempDir::new().unwrap();
        let layout = Layout::plan(tmp.path(), Profile::Debug).unwrap();
        assert!(layout.staging_dir().starts_with(layout.source_root()));
    }

    #[test]
    fn test_profile_parsing() {
        assert_eq!("debug".parse::<Profile>().unwrap(), Profile::Debug);
        assert_eq!("release".parse::<Profile>().unwrap(), Profile::Release);
        assert!("fast".parse::<Profile>().is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_plan_fails_on_readonly_root() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("frozen");
        fs::create_dir(&root).unwrap();
        fs::set_permissions(&root, fs::Permissions::from_mode(0o555)).unwrap();

        let result = Layout::plan(&root, Profile::Debug);
        fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(result, Err(LayoutError::Creation { .. })));
    }
}
