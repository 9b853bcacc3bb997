//! Doc command implementation (release notes).

use super::context::RepoContext;
use crate::cli::{DocAction, OutputManager};
use crate::config::Config;
use crate::error::Result;
use crate::release::ReleaseMutator;

/// Execute doc command
pub(super) async fn execute_doc(
    explicit_repo: Option<&str>,
    action: &DocAction,
    config: &Config,
    output: &OutputManager,
) -> Result<()> {
    let context = RepoContext::open(explicit_repo, config)?;
    let mutator = ReleaseMutator::new(&context.client, &context.repo);

    match action {
        DocAction::Clear { tag } => {
            mutator.clear_notes(tag).await?;
            output.success(&format!("cleared release notes of {}", tag))?;
        }
        DocAction::Add { tag, text } => {
            mutator.append_notes(tag, text).await?;
            output.success(&format!(
                "added {} line(s) to release notes of {}",
                text.len(),
                tag
            ))?;
        }
    }

    Ok(())
}
