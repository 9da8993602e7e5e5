//! Native build generator interface.
//!
//! The build generator is an external collaborator: it consumes the
//! layout's paths plus the resolved package installations, produces
//! descriptor files under the generators directory, and owns the actual
//! configure and compile phases. It is a trait so tests can substitute
//! a mock without invoking any real toolchain.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::ResolvedSet;
use crate::layout::Layout;

pub mod cmake;

pub use cmake::CMakeGenerator;

/// Error from the external build generator.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum BuildError {
    #[error("cmake not found in PATH")]
    #[diagnostic(
        code(gantry::build::cmake_not_found),
        help("Install CMake and ensure it's in your PATH, or set build.cmake in config.toml")
    )]
    CMakeNotFound,

    #[error("configure step failed (exit code {code:?})")]
    #[diagnostic(code(gantry::build::configure_failed))]
    ConfigureFailed { code: Option<i32>, stderr: String },

    #[error("compile step failed (exit code {code:?})")]
    #[diagnostic(code(gantry::build::compile_failed))]
    CompileFailed { code: Option<i32>, stderr: String },

    #[error("failed to spawn build generator")]
    #[diagnostic(code(gantry::build::spawn))]
    Spawn {
        #[source]
        source: std::io::Error,
    },
}

/// The consumed native build generator.
pub trait BuildGenerator {
    /// Write dependency/toolchain descriptor files into the layout's
    /// generators directory. Callable independently of configure/build.
    fn generate(&self, layout: &Layout, packages: &ResolvedSet) -> anyhow::Result<()>;

    /// Run the configure phase against the layout.
    fn configure(&self, layout: &Layout) -> Result<(), BuildError>;

    /// Run the compile phase. Only valid after a successful configure.
    fn build(&self, layout: &Layout) -> Result<(), BuildError>;
}

/// Run configure then build, in order. Failures are surfaced verbatim;
/// the compile phase is never entered after a failed configure.
pub fn configure_and_build(
    generator: &dyn BuildGenerator,
    layout: &Layout,
) -> Result<(), BuildError> {
    generator.configure(layout)?;
    generator.build(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use tempfile::TempDir;

    use crate::layout::Profile;

    /// Mock generator recording which phases ran.
    struct MockGenerator {
        fail_configure: bool,
        calls: RefCell<Vec<&'static str>>,
    }

    impl MockGenerator {
        fn new(fail_configure: bool) -> Self {
            MockGenerator {
                fail_configure,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl BuildGenerator for MockGenerator {
        fn generate(&self, _layout: &Layout, _packages: &ResolvedSet) -> anyhow::Result<()> {
            self.calls.borrow_mut().push("generate");
            Ok(())
        }

        fn configure(&self, _layout: &Layout) -> Result<(), BuildError> {
            self.calls.borrow_mut().push("configure");
            if self.fail_configure {
                return Err(BuildError::ConfigureFailed {
                    code: Some(1),
                    stderr: "missing compiler".to_string(),
                });
            }
            Ok(())
        }

        fn build(&self, _layout: &Layout) -> Result<(), BuildError> {
            self.calls.borrow_mut().push("build");
            Ok(())
        }
    }

    #[test]
    fn test_configure_then_build() {
        let tmp = TempDir::new().unwrap();
        let layout = Layout::plan(tmp.path(), Profile::Debug).unwrap();

        let generator = MockGenerator::new(false);
        configure_and_build(&generator, &layout).unwrap();
        assert_eq!(*generator.calls.borrow(), ["configure", "build"]);
    }

    #[test]
    fn test_failed_configure_skips_build() {
        let tmp = TempDir::new().unwrap();
        let layout = Layout::plan(tmp.path(), Profile::Debug).unwrap();

        let generator = MockGenerator::new(true);
        let err = configure_and_build(&generator, &layout).unwrap_err();

        assert!(matches!(err, BuildError::ConfigureFailed { .. }));
        assert_eq!(*generator.calls.borrow(), ["configure"]);
    }
}
