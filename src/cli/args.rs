//! Command line argument parsing and validation.

use clap::{Parser, Subcommand};

/// Manage GitHub releases of the current repository
#[derive(Parser, Debug)]
#[command(
    name = "git-release",
    version,
    arg_required_else_help = true,
    about = "Manage GitHub releases of the current repository",
    long_about = "Create or verify an API token, list releases with the current testing and
production release, promote or demote releases and edit their notes.

The repository is taken from the 'origin' remote unless --repo is given."
)]
pub struct Args {
    /// Repository to operate on (owner/name) instead of the origin remote
    #[arg(long, short = 'R', global = true, value_name = "OWNER/NAME", env = "GIT_RELEASE_REPO")]
    pub repo: Option<String>,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the current version
    Version,

    /// Create or verify the API token
    Login,

    /// List all releases
    List,

    /// Change the status of a release
    Set {
        /// Tag of the release to change
        tag: String,
        /// New state: r[elease], p[rerelease] or d[raft]
        state: String,
    },

    /// Edit release notes
    Doc {
        /// Notes operation
        #[command(subcommand)]
        action: DocAction,
    },
}

/// Release notes operations
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum DocAction {
    /// Clear the release notes
    Clear {
        /// Tag of the release
        tag: String,
    },

    /// Add one or more lines to the release notes
    Add {
        /// Tag of the release
        tag: String,
        /// Lines to append
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

impl Command {
    /// Command name for messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::Version => "version",
            Command::Login => "login",
            Command::List => "list",
            Command::Set { .. } => "set",
            Command::Doc {
                action: DocAction::Clear { .. },
            } => "doc clear",
            Command::Doc {
                action: DocAction::Add { .. },
            } => "doc add",
        }
    }
}

impl Args {
    /// Parse command line arguments
    ///
    /// Help and version requests also arrive as `Err`; see [`clap::Error::kind`].
    pub fn parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
