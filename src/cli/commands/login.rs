//! Login command implementation.

use crate::cli::{OutputManager, TerminalConsole};
use crate::config::Config;
use crate::credential::TokenFile;
use crate::error::Result;
use crate::github::GitHubClient;
use crate::provision::{ProvisionOutcome, TokenProvisioner};

/// Execute login command
pub(super) async fn execute_login(config: &Config, output: &OutputManager) -> Result<()> {
    let client = GitHubClient::new(config)?;
    let console = TerminalConsole::stdio();
    let store = TokenFile::new(&config.token_file);

    let outcome = TokenProvisioner::new(&client, &console, &store, config.authorization_note.as_str())
        .ensure_credential()
        .await?;

    match outcome {
        ProvisionOutcome::AlreadyValid => output.success("successfully logged in (stored token is valid)")?,
        ProvisionOutcome::Created { note } => output.success(&format!(
            "successfully logged in (token '{}' saved to {})",
            note,
            store.path().display()
        ))?,
    }

    Ok(())
}
