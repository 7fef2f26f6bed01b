//! `xc detach` command

use anyhow::Result;

use crate::GlobalOptions;
use xcproj::ops::detach::detach;
use xcproj::util::Status;

pub fn execute(global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let reports = detach(&global_opts.ctx)?;

    for report in &reports {
        shell.status(Status::Processing, report.project.display());
        for package in &report.packages {
            if !package.removed_local {
                shell.status(Status::Skipped, format!("{} is not attached", package.name));
                continue;
            }
            shell.status(Status::Detached, &package.name);
            if let Some(url) = &package.restored_remote {
                shell.status(Status::Restored, format!("{} ({})", package.name, url));
            }
            if package.folder_removed {
                shell.note(format!("removed folder reference for {}", package.name));
            }
        }
    }

    Ok(())
}
