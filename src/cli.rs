use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for dotref.
#[derive(Parser, Debug)]
#[command(
    name = "dotref",
    about = "Simple tool to manage dotfiles",
    version = option_env!("DOTREF_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Produce more verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Name of the profile to use for `init` and `profiles`
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Directory containing dotref profiles and state file
    #[arg(short, long, global = true, default_value = "dotref")]
    pub dotdir: PathBuf,

    /// Name of the state file inside the dot directory
    #[arg(short, long, global = true, default_value = ".dotref.json")]
    pub statefile: String,
}

impl GlobalOpts {
    /// Full path of the state file.
    #[must_use]
    pub fn state_path(&self) -> PathBuf {
        self.dotdir.join(&self.statefile)
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Select the profile used by status, sync, and unlink
    Init,
    /// Show the state of every action of the current profile
    Status,
    /// Create directories, links, and rendered templates
    Sync,
    /// Remove links and rendered templates
    Unlink,
    /// List profiles, or show one profile with --profile
    Profiles,
    /// Print version information
    Version,
}

impl Command {
    /// Subcommand name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Status => "status",
            Self::Sync => "sync",
            Self::Unlink => "unlink",
            Self::Profiles => "profiles",
            Self::Version => "version",
        }
    }
}
