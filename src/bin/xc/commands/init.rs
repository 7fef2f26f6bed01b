//! `xc init` command

use anyhow::Result;

use crate::cli::InitArgs;
use crate::GlobalOptions;
use xcproj::ops::init::{init, InitOptions};
use xcproj::util::Status;

pub fn execute(args: InitArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let ctx = &global_opts.ctx;

    let opts = InitOptions {
        project: args.project,
        workspace: args.workspace,
    };
    let config = init(ctx, &opts)?;

    shell.status(Status::Created, ctx.config_path().display());
    if let Some(project) = &config.project {
        shell.note(format!("project: {}", project));
    } else if let Some(workspace) = &config.workspace {
        shell.note(format!("workspace: {}", workspace));
    } else {
        shell.note("no project configured, it will be discovered on attach");
    }

    Ok(())
}
