//! `xc show` command

use anyhow::Result;

use crate::GlobalOptions;
use xcproj::ops::finder;
use xcproj::package::{self, NameSource};
use xcproj::util::diagnostic::suggestions;
use xcproj::util::{PackageList, ProgramConfiguration};

pub fn execute(global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let ctx = &global_opts.ctx;

    if !ctx.config_path().exists() {
        shell.warn(format!(
            "no configuration at {}",
            ctx.config_path().display()
        ));
        shell.note(suggestions::NO_CONFIG);
    }
    let config = ProgramConfiguration::read(ctx)?;

    shell.print(format!("config:    {}", ctx.config_dir().display()));
    let target = match (&config.project, &config.workspace) {
        (Some(project), _) => format!("{} (project)", project),
        (None, Some(workspace)) => format!("{} (workspace)", workspace),
        (None, None) => match finder::find_xcode_project(ctx.cwd()) {
            Ok(path) => format!("{} (discovered)", path.display()),
            Err(err) => format!("none ({})", err),
        },
    };
    shell.print(format!("target:    {}", target));

    let packages = PackageList::read(ctx)?;
    if packages.is_empty() {
        shell.print("packages:  none");
        return Ok(());
    }
    shell.print("packages:");
    for path in &packages {
        let summary = package::describe(&ctx.resolve(path));
        let products = match summary.source {
            NameSource::Directory => "unreadable manifest".to_string(),
            _ => summary.products.join(", "),
        };
        shell.print(format!("  {} [{}] {}", summary.name, products, path));
    }

    Ok(())
}
