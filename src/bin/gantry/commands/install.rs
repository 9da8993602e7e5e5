//! `gantry install` command

use anyhow::Result;

use crate::cli::InstallArgs;
use crate::commands::report_pipeline_failure;
use gantry::builder::CMakeGenerator;
use gantry::core::Manifest;
use gantry::layout::Profile;
use gantry::ops::pipeline::{self, PipelineOptions};
use gantry::provider::StoreProvider;
use gantry::stage::StageConfig;
use gantry::util::config::{load_config, Config};
use gantry::util::shell::{Shell, Status};
use gantry::util::GlobalContext;

pub fn execute(args: InstallArgs, shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;

    let manifest_path = ctx.find_manifest()?;
    let manifest = Manifest::load(&manifest_path)?;

    let config = load_config(
        &ctx.config_path(),
        &manifest.root().join(".gantry/config.toml"),
    );

    let profile = resolve_profile(args.profile.as_deref(), &manifest, &config)?;

    let provider = StoreProvider::new(ctx.store_dir(&config))
        .with_installer(config.store.installer.clone())
        .with_shell(shell.clone());
    let generator = CMakeGenerator::new(profile).with_cmake(config.build.cmake.clone());

    let opts = PipelineOptions {
        profile,
        skip_build: true,
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
        format!(
            "{} requirements resolved, {} binding files staged",
            summary.resolved.len(),
            summary.staged.len()
        ),
    );

    Ok(())
}

/// Profile precedence: CLI flag, then manifest, then config, then debug.
pub(crate) fn resolve_profile(
    cli: Option<&str>,
    manifest: &Manifest,
    config: &Config,
) -> Result<Profile> {
    let chosen = cli
        .or(manifest.build.profile.as_deref())
        .or(config.build.profile.as_deref());

    match chosen {
        Some(s) => s.parse::<Profile>().map_err(|e| anyhow::anyhow!("{}", e)),
        None => Ok(Profile::default()),
    }
}
