//! git-release - manage GitHub releases from the command line.

use git_release::cli;
use git_release::cli::OutputManager;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    match cli::run().await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            // Create output manager for error display (never quiet for fatal errors)
            let output = OutputManager::new(false);
            output.error(&format!("Fatal error: {e}"));

            for suggestion in e.recovery_suggestions() {
                output.error(&suggestion);
            }

            process::exit(1);
        }
    }
}
