//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};

/// xc - link local Swift packages into Xcode projects
#[derive(Parser)]
#[command(name = "xc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory that owns `.xcodecli/` (defaults to the working directory)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub config: Option<String>,

    /// Run as if started in this directory
    #[arg(short, long, global = true, value_name = "DIR")]
    pub workdir: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create .xcodecli/config.toml
    Init(InitArgs),

    /// Track a local package
    Link(LinkArgs),

    /// Stop tracking a local package
    Delink(DelinkArgs),

    /// Replace remote package references with the tracked local packages
    Attach,

    /// Undo `attach`, restoring the saved remote references
    Detach,

    /// Show the configured project and tracked packages
    Show,
}

#[derive(Args)]
pub struct InitArgs {
    /// Xcode project to link packages into
    #[arg(long, value_name = "PATH")]
    pub project: Option<String>,

    /// Xcode workspace whose projects packages are linked into
    #[arg(long, value_name = "PATH")]
    pub workspace: Option<String>,
}

#[derive(Args)]
pub struct LinkArgs {
    /// Package directory (defaults to the working directory; requires --config)
    pub path: Option<String>,
}

#[derive(Args)]
pub struct DelinkArgs {
    /// Package directory (defaults to the working directory; requires --config)
    pub path: Option<String>,
}
