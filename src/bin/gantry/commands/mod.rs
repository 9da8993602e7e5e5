//! CLI command implementations.

pub mod add;
pub mod build;
pub mod clean;
pub mod completions;
pub mod install;
pub mod remove;

use anyhow::anyhow;

use gantry::builder::BuildError;
use gantry::resolver::UnresolvedRequirement;
use gantry::stage::StageError;
use gantry::util::diagnostic::{self, suggestions};
use gantry::util::shell::Shell;

/// Turn a pipeline error into user-facing output, naming the failed step.
///
/// Resolution failures get a full diagnostic with suggestions; build
/// generator failures dump the external tool's stderr verbatim.
pub(crate) fn report_pipeline_failure(err: anyhow::Error, shell: &Shell) -> anyhow::Error {
    if let Some(unresolved) = err.downcast_ref::<UnresolvedRequirement>() {
        diagnostic::emit(&unresolved.to_diagnostic(), shell.color_enabled());
        return anyhow!("requirement resolution failed");
    }

    if let Some(StageError::SourceMissing { .. }) = err.downcast_ref::<StageError>() {
        eprintln!("{}", suggestions::NO_BINDINGS);
    }

    if let Some(build_err) = err.downcast_ref::<BuildError>() {
        match build_err {
            BuildError::ConfigureFailed { stderr, .. } => {
                eprint!("{}", stderr);
                eprintln!("{}", suggestions::CONFIGURE_FAILED);
            }
            BuildError::CompileFailed { stderr, .. } => {
                eprint!("{}", stderr);
            }
            _ => {}
        }
    }

    err
}
