//! `xc link` command

use anyhow::Result;

use crate::cli::LinkArgs;
use crate::GlobalOptions;
use xcproj::ops::link::link;
use xcproj::util::Status;

pub fn execute(args: LinkArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let ctx = &global_opts.ctx;

    let result = link(ctx, args.path.as_deref())?;

    shell.status(
        Status::Added,
        format!("{} ({})", result.manifest.name, result.path.display()),
    );
    shell.note(format!(
        "libraries: {}",
        result.manifest.libraries.join(", ")
    ));
    shell.note(format!("{} package(s) tracked", result.packages.len()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse_link_args(args: &[&str]) -> LinkArgs {
        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            link: LinkArgs,
        }
        TestCli::parse_from(args).link
    }

    #[test]
    fn test_link_args_default_to_cwd() {
        let args = parse_link_args(&["test"]);
        assert!(args.path.is_none());
    }

    #[test]
    fn test_link_args_with_path() {
        let args = parse_link_args(&["test", "../packages/Networking"]);
        assert_eq!(args.path.as_deref(), Some("../packages/Networking"));
    }

    #[test]
    fn test_link_args_keep_tilde() {
        let args = parse_link_args(&["test", "~/src/Core"]);
        assert_eq!(args.path.as_deref(), Some("~/src/Core"));
    }
}
