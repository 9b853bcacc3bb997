//! Command line interface for git-release.
//!
//! Argument parsing, interactive prompting, colored output and the command
//! implementations.

mod args;
pub mod commands;
mod console;
mod output;

pub use args::{Args, Command, DocAction};
pub use commands::execute_command;
pub use console::{InteractiveConsole, TerminalConsole};
pub use output::OutputManager;

use crate::error::{CliError, Result};
use clap::error::ErrorKind;

/// Main CLI entry point
///
/// Help and version output exit with 0; any other argument error is returned
/// as [`CliError::InvalidArguments`].
pub async fn run() -> Result<i32> {
    let args = match Args::parse_args() {
        Ok(args) => args,
        Err(e) => return usage_exit(e),
    };
    execute_command(args).await
}

fn usage_exit(e: clap::Error) -> Result<i32> {
    match e.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            e.print()?;
            Ok(0)
        }
        _ => {
            let rendered = e.render().to_string();
            Err(CliError::InvalidArguments {
                reason: rendered.trim().trim_start_matches("error: ").to_string(),
            }
            .into())
        }
    }
}
