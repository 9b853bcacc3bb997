//! List command implementation.
//!
//! Prints every release newest tag first, flags the current testing and
//! production releases and warns about channels that have none.

use super::context::RepoContext;
use crate::cli::OutputManager;
use crate::config::Config;
use crate::error::Result;
use crate::github::ReleaseApi;
use crate::release::{ClassifiedRelease, ReleaseKind, ReleaseReport, classify};
use termcolor::Color;

/// Execute list command
pub(super) async fn execute_list(
    explicit_repo: Option<&str>,
    config: &Config,
    output: &OutputManager,
) -> Result<()> {
    let context = RepoContext::open(explicit_repo, config)?;
    let releases = context.client.list_releases(&context.repo).await?;

    let report = classify(&releases);
    print_report(&report, output)?;
    Ok(())
}

fn kind_color(kind: ReleaseKind) -> Color {
    match kind {
        ReleaseKind::Draft => Color::Red,
        ReleaseKind::Prerelease => Color::Yellow,
        ReleaseKind::Release => Color::Green,
    }
}

fn print_entry(entry: &ClassifiedRelease, output: &OutputManager) -> std::io::Result<()> {
    output.colored(
        kind_color(entry.kind),
        &format!("{} ({})", entry.tag, entry.kind.label()),
    )?;
    if let Some(marker) = entry.marker {
        output.colored(Color::Blue, marker.label())?;
    }

    let published = entry
        .published_at
        .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_default();
    output.labeled(Color::Blue, "released:", &published)?;

    output.colored(Color::Blue, "notes:")?;
    for line in &entry.notes {
        output.indent(line)?;
    }
    output.println("")
}

fn print_report(report: &ReleaseReport, output: &OutputManager) -> std::io::Result<()> {
    for entry in &report.entries {
        print_entry(entry, output)?;
    }
    for missing in report.missing_channels() {
        output.colored(Color::Red, &format!("{}!", missing.message()))?;
    }
    Ok(())
}
