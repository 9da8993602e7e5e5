//! `gantry build` command

use anyhow::Result;

use crate::cli::BuildArgs;
use crate::commands::install::resolve_profile;
use crate::commands::report_pipeline_failure;
use gantry::builder::CMakeGenerator;
use gantry::core::Manifest;
use gantry::ops::pipeline::{self, PipelineOptions};
use gantry::provider::StoreProvider;
use gantry::stage::StageConfig;
use gantry::util::config::load_config;
use gantry::util::shell::{Shell, Status};
use gantry::util::GlobalContext;

pub fn execute(args: BuildArgs, shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;

    let manifest_path = ctx.find_manifest()?;
    let manifest = Manifest::load(&manifest_path)?;

    let config = load_config(
        &ctx.config_path(),
        &manifest.root().join(".gantry/config.toml"),
    );

    // --profile wins over --release
    let cli_profile = args
        .profile
        .as_deref()
        .or(if args.release { Some("release") } else { None });
    let profile = resolve_profile(cli_profile, &manifest, &config)?;

    let provider = StoreProvider::new(ctx.store_dir(&config))
        .with_installer(config.store.installer.clone())
        .with_shell(shell.clone());
    let generator = CMakeGenerator::new(profile).with_cmake(config.build.cmake.clone());

    let opts = PipelineOptions {
        profile,
        skip_build: false,
    };

    let summary = pipeline::run(
        &manifest,
        &provider,
        &generator,
        &StageConfig::default(),
        &opts,
        shell,
    )
    .map_err(|e| report_pipeline_failure(e, shell))?;

    shell.status(
        Status::Finished,
        format!("{} ({} profile)", manifest.project.name, profile),
    );
    tracing::debug!(
        "resolved: {}; staged: {}",
        summary.resolved.join(", "),
        summary.staged.len()
    );

    Ok(())
}
