//! `gantry clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use gantry::core::Manifest;
use gantry::util::fs::remove_dir_all_if_exists;
use gantry::util::shell::{Shell, Status};
use gantry::util::GlobalContext;

pub fn execute(args: CleanArgs, shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let manifest_path = ctx.find_manifest()?;
    let manifest = Manifest::load(&manifest_path)?;

    let build_dir = manifest.root().join("build");
    remove_dir_all_if_exists(&build_dir)?;
    shell.status(Status::Removed, build_dir.display().to_string());

    if args.bindings {
        let staging_dir = manifest.root().join("bindings");
        remove_dir_all_if_exists(&staging_dir)?;
        shell.status(Status::Removed, staging_dir.display().to_string());
    }

    Ok(())
}
