//! Command execution.
//!
//! Each command reports its own success; failures are reported here with
//! recovery suggestions and turned into exit status 1.

mod context;
mod doc;
mod list;
mod login;
mod set;

use crate::cli::{Args, Command, OutputManager};
use crate::config::Config;
use crate::error::Result;

use doc::execute_doc;
use list::execute_list;
use login::execute_login;
use set::execute_set;

/// Execute the command based on parsed arguments; returns the exit code
pub async fn execute_command(args: Args) -> Result<i32> {
    let output = OutputManager::new(args.quiet);

    match dispatch(&args, &output).await {
        Ok(()) => Ok(0),
        Err(e) => {
            log::debug!("Command '{}' failed: {:?}", args.command.name(), e);
            output.error(&format!("{}", e));

            for suggestion in e.recovery_suggestions() {
                output.error(&suggestion);
            }

            Ok(1)
        }
    }
}

async fn dispatch(args: &Args, output: &OutputManager) -> Result<()> {
    if let Command::Version = args.command {
        output.println(&format!("git-release version {}", env!("CARGO_PKG_VERSION")))?;
        return Ok(());
    }

    let config = Config::from_env()?;
    let repo = args.repo.as_deref();

    match &args.command {
        Command::Version => Ok(()),
        Command::Login => execute_login(&config, output).await,
        Command::List => execute_list(repo, &config, output).await,
        Command::Set { tag, state } => execute_set(repo, tag, state, &config, output).await,
        Command::Doc { action } => execute_doc(repo, action, &config, output).await,
    }
}
