use anyhow::{Context, Result};

use dialed_application::PracticeTracker;

const NOTES: &[&str] = &[
    "Pro scoring records every putt and tracks your cold-start rate",
    "Same-day practice sessions can be merged",
    "League nights show round averages and circle accuracy",
];

/// Prints the release notes once per version.
pub async fn show_if_unseen(tracker: &PracticeTracker) -> Result<()> {
    let current = semver::Version::parse(env!("CARGO_PKG_VERSION"))
        .context("Invalid package version")?;
    if !tracker.has_unseen_release(&current).await {
        return Ok(());
    }

    println!("✨ What's new in DIALED v{}", current);
    for note in NOTES {
        println!("  • {}", note);
    }
    println!();
    tracker.acknowledge_release(&current).await?;
    Ok(())
}
