//! Set command implementation.

use super::context::RepoContext;
use crate::cli::OutputManager;
use crate::config::Config;
use crate::error::Result;
use crate::release::{ReleaseMutator, ReleaseStatus};

/// Execute set command
pub(super) async fn execute_set(
    explicit_repo: Option<&str>,
    tag: &str,
    state: &str,
    config: &Config,
    output: &OutputManager,
) -> Result<()> {
    // reject a bad keyword before touching the network
    let status: ReleaseStatus = state.parse()?;

    let context = RepoContext::open(explicit_repo, config)?;
    ReleaseMutator::new(&context.client, &context.repo)
        .set_status(tag, status)
        .await?;

    output.success(&format!("{} of {} is now a {}", tag, context.repo, status))?;
    Ok(())
}
