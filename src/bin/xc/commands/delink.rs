//! `xc delink` command

use anyhow::Result;

use crate::cli::DelinkArgs;
use crate::GlobalOptions;
use xcproj::ops::link::delink;
use xcproj::util::Status;

pub fn execute(args: DelinkArgs, global_opts: &GlobalOptions) -> Result<()> {
    let path = delink(&global_opts.ctx, args.path.as_deref())?;
    global_opts
        .shell
        .status(Status::Removed, path.display());
    Ok(())
}
