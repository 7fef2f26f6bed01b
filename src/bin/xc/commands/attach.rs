//! `xc attach` command

use anyhow::Result;

use crate::GlobalOptions;
use xcproj::ops::attach::{attach, AttachedPackage, LocalLink};
use xcproj::util::diagnostic::suggestions;
use xcproj::util::{Shell, Status};

pub fn execute(global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let reports = attach(&global_opts.ctx)?;

    for report in &reports {
        shell.status(Status::Processing, report.project.display());
        if report.packages.is_empty() {
            shell.status(Status::Skipped, "no packages are linked");
            shell.note(suggestions::NO_PACKAGES);
        }
        for package in &report.packages {
            print_package(shell, package);
        }
    }

    Ok(())
}

fn print_package(shell: &Shell, package: &AttachedPackage) {
    if let Some(url) = &package.removed_remote {
        shell.status(Status::Removed, format!("{} ({})", package.name, url));
        if !package.saved_state {
            shell.warn(format!(
                "remote reference for {} was not saved and cannot be restored by detach",
                package.name
            ));
        }
    }
    match &package.local {
        LocalLink::Added { relative_path } => {
            shell.status(
                Status::Attached,
                format!("{} ({})", package.name, relative_path),
            );
        }
        LocalLink::AlreadyAttached => {
            shell.status(Status::Skipped, format!("{} is already attached", package.name));
        }
    }
    if package.folder_added {
        shell.note(format!("added folder reference for {}", package.name));
    }
}
