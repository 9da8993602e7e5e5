//! The configure pipeline.
//!
//! Strictly ordered, single-threaded: registry → resolve (all entries,
//! fail-fast) → layout → descriptor generation → binding staging →
//! optional configure+build. Each step consumes its predecessor's output;
//! a failure aborts at the step where it occurs, and already-completed
//! side effects (created directories, staged files) are left in place
//! since they are idempotently reproducible on the next run.

use anyhow::{Context, Result};

use crate::builder::BuildGenerator;
use crate::core::{Manifest, RequirementRegistry, ResolvedSet};
use crate::layout::{Layout, Profile};
use crate::provider::PackageProvider;
use crate::resolver::resolve_all;
use crate::stage::{stage, StageConfig, StagedFileSet};
use crate::util::shell::{Shell, Status};

/// Options for one pipeline invocation.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Build profile
    pub profile: Profile,

    /// Stop after staging; leave configure/build to a later invocation
    pub skip_build: bool,
}

/// What one pipeline run produced, for status reporting.
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    /// Resolved packages as `name vX.Y.Z`, in declaration order
    pub resolved: Vec<String>,

    /// Files staged into the bindings directory
    pub staged: StagedFileSet,

    /// Whether configure+build ran
    pub built: bool,
}

/// Run the pipeline over a loaded manifest.
pub fn run(
    manifest: &Manifest,
    provider: &dyn PackageProvider,
    generator: &dyn BuildGenerator,
    stage_config: &StageConfig,
    opts: &PipelineOptions,
    shell: &Shell,
) -> Result<PipelineSummary> {
    // Registry
    let registry = RequirementRegistry::from_manifest(manifest);
    shell.status(
        Status::Resolving,
        format!("{} requirements", registry.len()),
    );

    // Resolver: all entries, first failure aborts
    let resolved = resolve_all(&registry, provider)?;

    // Layout
    let layout = Layout::plan(manifest.root(), opts.profile)?;

    // Descriptor generation
    generator
        .generate(&layout, &resolved)
        .context("failed to generate build descriptors")?;
    shell.status(
        Status::Generated,
        crate::util::fs::relative_path(layout.source_root(), layout.generators_dir())
            .display()
            .to_string(),
    );

    // Binding staging
    let staged = stage_bindings(&resolved, stage_config, &layout, shell)?;

    // Build driver (optional)
    let built = if opts.skip_build {
        false
    } else {
        shell.status(
            Status::Configuring,
            layout.build_root().display().to_string(),
        );
        generator.configure(&layout)?;
        shell.status(Status::Building, manifest.project.name.clone());
        generator.build(&layout)?;
        true
    };

    Ok(PipelineSummary {
        resolved: resolved
            .packages()
            .iter()
            .map(|p| p.to_string())
            .collect(),
        staged,
        built,
    })
}

/// Stage toolkit bindings if the toolkit is among the requirements.
///
/// A project without the UI toolkit requirement has nothing to stage;
/// that is not an error.
fn stage_bindings(
    resolved: &ResolvedSet,
    config: &StageConfig,
    layout: &Layout,
    shell: &Shell,
) -> Result<StagedFileSet> {
    let Some(toolkit) = resolved.get(config.toolkit()) else {
        tracing::debug!(
            "toolkit `{}` not among requirements; skipping binding staging",
            config.toolkit()
        );
        return Ok(StagedFileSet::default());
    };

    let staged = stage(toolkit, config.patterns(), layout)?;
    shell.status(
        Status::Staged,
        format!(
            "{} binding files -> {}",
            staged.len(),
            crate::util::fs::relative_path(layout.source_root(), layout.staging_dir()).display()
        ),
    );
    Ok(staged)
}
