//! CMake build generator.
//!
//! Descriptor generation writes two files into the generators directory:
//!
//! - `gantry_toolchain.cmake` - build type, prefix path over the resolved
//!   package roots, staged-bindings include hint
//! - `gantry_deps.cmake` - per-package `<NAME>_ROOT`/include/lib variables
//!
//! Configure and build shell out to the cmake binary and surface its exit
//! status verbatim; no retries, no output interpretation.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::builder::{BuildError, BuildGenerator};
use crate::core::ResolvedSet;
use crate::layout::{Layout, Profile};
use crate::util::process::{find_cmake, ProcessBuilder};

/// Toolchain descriptor file name.
pub const TOOLCHAIN_FILE: &str = "gantry_toolchain.cmake";

/// Dependency descriptor file name.
pub const DEPS_FILE: &str = "gantry_deps.cmake";

/// CMake-backed build generator.
pub struct CMakeGenerator {
    cmake: Option<PathBuf>,
    profile: Profile,
}

impl CMakeGenerator {
    /// Create a generator for the given profile, locating cmake on PATH.
    ///
    /// A missing cmake binary is not an error here: descriptor generation
    /// works without it, and configure reports it when actually needed.
    pub fn new(profile: Profile) -> Self {
        CMakeGenerator {
            cmake: find_cmake(),
            profile,
        }
    }

    /// Override the cmake binary (from config).
    pub fn with_cmake(mut self, cmake: Option<PathBuf>) -> Self {
        if cmake.is_some() {
            self.cmake = cmake;
        }
        self
    }

    fn cmake_binary(&self) -> Result<&Path, BuildError> {
        self.cmake.as_deref().ok_or(BuildError::CMakeNotFound)
    }

    fn toolchain_path(&self, layout: &Layout) -> PathBuf {
        layout.generators_dir().join(TOOLCHAIN_FILE)
    }

    fn render_toolchain(&self, layout: &Layout, packages: &ResolvedSet) -> String {
        let mut out = String::new();
        out.push_str("# Generated by gantry. Do not edit.\n\n");
        out.push_str(&format!(
            "set(CMAKE_BUILD_TYPE {} CACHE STRING \"\")\n",
            self.profile.cmake_build_type()
        ));
        out.push_str("set(CMAKE_POSITION_INDEPENDENT_CODE ON)\n");

        for package in packages.packages() {
            out.push_str(&format!(
                "list(PREPEND CMAKE_PREFIX_PATH \"{}\")\n",
                cmake_path(package.install_path())
            ));
        }

        out.push_str(&format!(
            "\ninclude_directories(\"{}\")\n",
            cmake_path(layout.staging_dir())
        ));
        out.push_str(&format!(
            "include(\"${{CMAKE_CURRENT_LIST_DIR}}/{}\")\n",
            DEPS_FILE
        ));
        out
    }

    fn render_deps(&self, packages: &ResolvedSet) -> String {
        let mut out = String::new();
        out.push_str("# Generated by gantry. Do not edit.\n");

        for package in packages.packages() {
            let var = cmake_var(package.name());
            let root = package.install_path();
            out.push('\n');
            out.push_str(&format!("set({}_ROOT \"{}\")\n", var, cmake_path(root)));
            out.push_str(&format!(
                "set({}_INCLUDE_DIR \"{}\")\n",
                var,
                cmake_path(&root.join("include"))
            ));
            out.push_str(&format!(
                "set({}_LIB_DIR \"{}\")\n",
                var,
                cmake_path(&root.join("lib"))
            ));
        }

        out
    }
}

impl BuildGenerator for CMakeGenerator {
    fn generate(&self, layout: &Layout, packages: &ResolvedSet) -> Result<()> {
        write_descriptor(
            layout.generators_dir(),
            TOOLCHAIN_FILE,
            &self.render_toolchain(layout, packages),
        )?;
        write_descriptor(layout.generators_dir(), DEPS_FILE, &self.render_deps(packages))?;

        tracing::info!(
            "generated descriptors in {}",
            layout.generators_dir().display()
        );
        Ok(())
    }

    fn configure(&self, layout: &Layout) -> Result<(), BuildError> {
        let cmake = self.cmake_binary()?;
        tracing::info!("configuring {}", layout.build_root().display());

        let output = ProcessBuilder::new(cmake)
            .arg("-S")
            .arg(layout.source_root())
            .arg("-B")
            .arg(layout.build_root())
            .arg(format!(
                "-DCMAKE_BUILD_TYPE={}",
                self.profile.cmake_build_type()
            ))
            .arg(format!(
                "-DCMAKE_TOOLCHAIN_FILE={}",
                self.toolchain_path(layout).display()
            ))
            .exec()
            .map_err(|e| BuildError::Spawn {
                source: std::io::Error::other(e),
            })?;

        if !output.status.success() {
            return Err(BuildError::ConfigureFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(())
    }

    fn build(&self, layout: &Layout) -> Result<(), BuildError> {
        let cmake = self.cmake_binary()?;
        tracing::info!("building {}", layout.build_root().display());

        let output = ProcessBuilder::new(cmake)
            .arg("--build")
            .arg(layout.build_root())
            .arg("--parallel")
            .arg("--config")
            .arg(self.profile.cmake_build_type())
            .exec()
            .map_err(|e| BuildError::Spawn {
                source: std::io::Error::other(e),
            })?;

        if !output.status.success() {
            return Err(BuildError::CompileFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(())
    }
}

/// Atomically write a descriptor file into the generators directory.
fn write_descriptor(dir: &Path, name: &str, contents: &str) -> Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("failed to write {}", name))?;

    let path = dir.join(name);
    tmp.persist(&path)
        .with_context(|| format!("failed to persist {}", path.display()))?;
    Ok(())
}

/// CMake variable prefix for a package name.
fn cmake_var(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Render a path with forward slashes, as CMake expects on all platforms.
fn cmake_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}
