//! `gantry remove` command

use anyhow::Result;

use crate::cli::RemoveArgs;
use gantry::ops::gantry_add::remove_requirement;
use gantry::util::shell::{Shell, Status};
use gantry::util::GlobalContext;

pub fn execute(args: RemoveArgs, shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let manifest_path = ctx.find_manifest()?;

    if remove_requirement(&manifest_path, &args.name)? {
        shell.status(Status::Removed, format!("{} from Gantry.toml", args.name));
    } else {
        shell.status(
            Status::Warning,
            format!("`{}` is not a declared requirement", args.name),
        );
    }

    Ok(())
}
