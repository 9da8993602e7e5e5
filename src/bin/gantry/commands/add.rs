//! `gantry add` command

use anyhow::Result;

use crate::cli::AddArgs;
use gantry::ops::gantry_add::add_requirement;
use gantry::util::shell::{Shell, Status};
use gantry::util::GlobalContext;

pub fn execute(args: AddArgs, shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let manifest_path = ctx.find_manifest()?;

    let spec = add_requirement(&manifest_path, &args.entry)?;
    shell.status(Status::Added, format!("{} to Gantry.toml", spec));

    Ok(())
}
