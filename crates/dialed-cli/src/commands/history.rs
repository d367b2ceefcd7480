use anyhow::{Result, bail};

use dialed_application::PracticeTracker;
use dialed_core::session::{HistoryFilter, Session};
use dialed_core::stats::percent;

use super::input::Prompt;

fn describe(session: &Session) -> String {
    if session.is_league() {
        let legacy = if session.is_legacy { " (imported)" } else { "" };
        return format!("LEAGUE    {} pts{}", session.league_total(), legacy);
    }
    let kind = if session.is_world() { "WORLD" } else { "PRACTICE" };
    let summary = session.summary();
    format!(
        "{:<9} {}/{} ({}%), {} rounds",
        kind,
        summary.made,
        summary.attempts,
        percent(summary.made, summary.attempts),
        session.rounds.len()
    )
}

pub async fn list(tracker: &PracticeTracker, filter: HistoryFilter) -> Result<()> {
    tracker.set_filter(filter).await?;
    let sessions = tracker.visible_sessions().await;
    if sessions.is_empty() {
        println!("No sessions yet");
        return Ok(());
    }
    for session in &sessions {
        println!("{:>14}  {:<10}  {}", session.id, session.date, describe(session));
    }
    Ok(())
}

fn confirmed(yes: bool, question: &str) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    Prompt::terminal()?.confirm(question)
}

pub async fn delete(tracker: &PracticeTracker, id: i64, yes: bool) -> Result<()> {
    let state = tracker.state().await;
    let Some(session) = state.history().find(id) else {
        bail!("No session with id {}", id);
    };
    if !confirmed(yes, &format!("Delete {} from {}?", describe(session).trim(), session.date))? {
        return Ok(());
    }
    tracker.delete_session(id).await?;
    println!("🗑️  Deleted session {}", id);
    Ok(())
}

pub async fn merge(tracker: &PracticeTracker, existing: i64, incoming: i64) -> Result<()> {
    let merged = tracker.merge_sessions(existing, incoming).await?;
    println!("🔗 Merged into {}: {}", merged.id, describe(&merged));
    Ok(())
}

pub async fn clear(tracker: &PracticeTracker, yes: bool) -> Result<()> {
    let count = tracker.state().await.history().len();
    if !confirmed(yes, &format!("Delete all {} sessions? This cannot be undone.", count))? {
        return Ok(());
    }
    tracker.clear_history().await?;
    println!("🗑️  History cleared");
    Ok(())
}
