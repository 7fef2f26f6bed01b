//! xc CLI - link local Swift packages into Xcode projects

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use xcproj::util::diagnostic::{
    emit, AmbiguousProjectError, NoProjectFoundError, ProjectSyntaxError,
};
use xcproj::util::shell::ColorChoice;
use xcproj::util::{GlobalContext, Shell};
use xcproj::ProjectError;

/// Options shared by every command.
pub struct GlobalOptions {
    pub shell: Shell,
    pub ctx: GlobalContext,
}

fn main() {
    let cli = Cli::parse();
    let color = if cli.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let shell = Shell::from_flags(cli.verbose, color);
    let use_color = shell.use_color();

    if let Err(e) = run(cli, shell) {
        report(e, use_color);
        std::process::exit(1);
    }
}

fn run(cli: Cli, shell: Shell) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("xcproj=debug")
    } else {
        EnvFilter::new("xcproj=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let mut ctx = GlobalContext::from_options(cli.workdir.as_deref(), cli.config.as_deref())?;
    ctx.set_verbose(cli.verbose);
    ctx.set_color(shell.use_color());
    let global_opts = GlobalOptions { shell, ctx };

    // Execute command
    match cli.command {
        Commands::Init(args) => commands::init::execute(args, &global_opts),
        Commands::Link(args) => commands::link::execute(args, &global_opts),
        Commands::Delink(args) => commands::delink::execute(args, &global_opts),
        Commands::Attach => commands::attach::execute(&global_opts),
        Commands::Detach => commands::detach::execute(&global_opts),
        Commands::Show => commands::show::execute(&global_opts),
    }
}

fn report(e: anyhow::Error, color: bool) {
    if let Some(err) = e.downcast_ref::<ProjectError>() {
        emit(&err.to_diagnostic(), color);
        return;
    }
    let e = match e.downcast::<ProjectSyntaxError>() {
        Ok(err) => return eprintln!("{:?}", miette::Report::new(err)),
        Err(e) => e,
    };
    let e = match e.downcast::<NoProjectFoundError>() {
        Ok(err) => return eprintln!("{:?}", miette::Report::new(err)),
        Err(e) => e,
    };
    let e = match e.downcast::<AmbiguousProjectError>() {
        Ok(err) => return eprintln!("{:?}", miette::Report::new(err)),
        Err(e) => e,
    };
    eprintln!("error: {:#}", e);
}
