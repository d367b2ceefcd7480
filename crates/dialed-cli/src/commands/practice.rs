use anyhow::Result;

use dialed_application::{MergePolicy, PracticeTracker, SaveOutcome};
use dialed_core::scoring::{PracticeDraft, ScoringStyle};
use dialed_core::session::{Session, Summary};
use dialed_core::stats::percent;

use super::input::{LineSource, Prompt, parse_made, parse_sequence};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DuplicateChoice {
    Ask,
    Merge,
    Keep,
}

impl From<DuplicateChoice> for MergePolicy {
    fn from(choice: DuplicateChoice) -> Self {
        match choice {
            DuplicateChoice::Ask => MergePolicy::Ask,
            DuplicateChoice::Merge => MergePolicy::Merge,
            DuplicateChoice::Keep => MergePolicy::KeepSeparate,
        }
    }
}

/// One line typed during a session.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Made(u32),
    Sequence(Vec<bool>),
    Distance(u32),
    Undo,
    Finish,
    Quit,
}

fn parse_command(line: &str, style: ScoringStyle) -> Option<Command> {
    let line = line.trim();
    match line {
        "u" | "undo" => return Some(Command::Undo),
        "f" | "finish" => return Some(Command::Finish),
        "q" | "quit" => return Some(Command::Quit),
        _ => {}
    }
    if let Some(distance) = line.strip_prefix('d') {
        return distance.trim().parse().ok().map(Command::Distance);
    }
    match style {
        ScoringStyle::Simple => parse_made(line).map(Command::Made),
        ScoringStyle::Pro => parse_sequence(line).map(Command::Sequence),
    }
}

fn describe(session: &Session) -> String {
    let Summary { attempts, made } = session.summary();
    format!(
        "{} rounds, {}/{} ({}%)",
        session.rounds.len(),
        made,
        attempts,
        percent(made, attempts)
    )
}

pub async fn run(
    tracker: &PracticeTracker,
    style: Option<ScoringStyle>,
    distance: Option<u32>,
    on_duplicate: DuplicateChoice,
) -> Result<()> {
    let mut draft = tracker.resume_draft().await?;
    if let Some(style) = style {
        draft = PracticeDraft::resume(style, draft.rounds().to_vec());
    }
    if !draft.is_empty() {
        println!("↩️  Resuming unfinished session ({} rounds)", draft.rounds().len());
    }
    if let Some(distance) = distance {
        draft.set_distance(distance)?;
    }

    let help = match draft.style() {
        ScoringStyle::Simple => "made (0-5)",
        ScoringStyle::Pro => "putts (e.g. x o x x -)",
    };
    println!("🥏 Practice: {} | d <ft> distance | u undo | f finish | q quit", help);

    let mut prompt = Prompt::terminal()?;
    loop {
        let total = Summary::of_rounds(draft.rounds());
        let message = format!(
            "[{}ft | {}/{}]>",
            draft.distance(),
            total.made,
            total.attempts
        );
        let Some(line) = prompt.ask(&message)? else {
            break;
        };

        let Some(command) = parse_command(&line, draft.style()) else {
            println!("  ? {}", help);
            continue;
        };
        let logged = match command {
            Command::Made(made) => draft.log_made(tracker.next_id(), made).map(|_| ()),
            Command::Sequence(sequence) => {
                draft.log_sequence(tracker.next_id(), &sequence).map(|_| ())
            }
            Command::Distance(distance) => {
                if let Err(e) = draft.set_distance(distance) {
                    println!("  ⚠️  {}", e);
                }
                continue;
            }
            Command::Undo => {
                if draft.undo().is_none() {
                    println!("  Nothing to undo");
                }
                Ok(())
            }
            Command::Finish => return finish(tracker, draft, on_duplicate, &mut prompt).await,
            Command::Quit => break,
        };
        if let Err(e) = logged {
            println!("  ⚠️  {}", e);
            continue;
        }
        tracker.store_draft(draft.rounds()).await;
    }

    if !draft.is_empty() {
        println!("💾 Session kept; run `dialed practice` to resume it");
    }
    Ok(())
}

async fn finish<S: LineSource>(
    tracker: &PracticeTracker,
    draft: PracticeDraft,
    on_duplicate: DuplicateChoice,
    prompt: &mut Prompt<S>,
) -> Result<()> {
    let outcome = match tracker.finish_practice(draft, on_duplicate.into()).await? {
        Some(SaveOutcome::DuplicateFound { existing, incoming }) => {
            let question = format!(
                "You already practiced on {} ({}). Merge this session into it?",
                existing.date,
                describe(&existing)
            );
            let policy = if prompt.confirm(&question)? {
                MergePolicy::Merge
            } else {
                MergePolicy::KeepSeparate
            };
            let outcome = tracker.save_session(incoming, policy).await?;
            tracker.discard_draft().await;
            outcome
        }
        Some(outcome) => outcome,
        None => {
            println!("No rounds logged; nothing saved");
            return Ok(());
        }
    };

    match outcome {
        SaveOutcome::Saved(session) => println!("✅ Saved: {}", describe(&session)),
        SaveOutcome::Merged(session) => println!("🔗 Merged: {}", describe(&session)),
        SaveOutcome::DuplicateFound { .. } => {}
    }

    let streak = tracker.stats().await.streak;
    println!("🔥 {}: {}", streak.milestone.title, streak.milestone.msg);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        use ScoringStyle::{Pro, Simple};
        assert_eq!(parse_command("4", Simple), Some(Command::Made(4)));
        assert_eq!(parse_command("d 33", Simple), Some(Command::Distance(33)));
        assert_eq!(parse_command("d33", Pro), Some(Command::Distance(33)));
        assert_eq!(parse_command("u", Pro), Some(Command::Undo));
        assert_eq!(parse_command("f", Simple), Some(Command::Finish));
        assert_eq!(parse_command("4", Pro), None);
        assert_eq!(
            parse_command("xxxxo", Pro),
            Some(Command::Sequence(vec![true, true, true, true, false]))
        );
        assert_eq!(parse_command("9", Simple), None);
    }
}
