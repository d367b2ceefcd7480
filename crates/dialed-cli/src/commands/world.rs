use anyhow::Result;

use dialed_application::{PracticeTracker, SaveOutcome};
use dialed_core::world::{Movement, WorldGame, WorldOutcome};

use super::input::{Prompt, parse_made};

fn ladder_line(game: &WorldGame) -> String {
    game.visible_stations()
        .map(|distance| {
            if distance == game.current_distance() {
                format!("[{}]", distance)
            } else {
                distance.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" → ")
}

fn report(outcome: &WorldOutcome) {
    match outcome.movement {
        Movement::Advanced { from, to } => println!("  ⬆️  {}ft → {}ft", from, to),
        Movement::Held { at } => println!("  ⏸️  Staying at {}ft", at),
        Movement::Retreated { from, to } => println!("  ⬇️  {}ft → {}ft", from, to),
        Movement::Completed => {}
    }
    if let Some(unlock) = outcome.unlock {
        println!("\n  🌍 {}\n  {}\n", unlock.title(), unlock.message());
    }
}

pub async fn run(tracker: &PracticeTracker) -> Result<()> {
    let mut game = WorldGame::new();
    let mut prompt = Prompt::terminal()?;
    println!(
        "🌍 Around the World | made (0-5), or +/- then enter | f finish | q quit without saving"
    );

    while !game.is_complete() {
        println!("{}", ladder_line(&game));
        let rule = game.current_rule();
        let message = format!(
            "[{}ft | {} | {} made]>",
            rule.distance,
            rule.label(),
            game.made_this_station()
        );
        let Some(line) = prompt.ask(&message)? else {
            break;
        };
        match line.as_str() {
            "+" => {
                game.adjust(1);
                continue;
            }
            "-" => {
                game.adjust(-1);
                continue;
            }
            "" => {
                let outcome = game.log_current(tracker.next_id())?;
                report(&outcome);
                continue;
            }
            "f" | "finish" => break,
            "q" | "quit" => {
                if game.rounds().is_empty() || prompt.confirm("Abandon this game?")? {
                    return Ok(());
                }
                continue;
            }
            _ => {}
        }
        let Some(made) = parse_made(&line) else {
            println!("  ? made (0-5)");
            continue;
        };
        let outcome = game.log(tracker.next_id(), made)?;
        report(&outcome);
    }

    match tracker.finish_world(game).await? {
        Some(SaveOutcome::Saved(session)) => {
            let peak = session.rounds.iter().map(|r| r.distance).max().unwrap_or(0);
            println!("✅ Saved World game: {} stations, reached {}ft", session.rounds.len(), peak);
        }
        Some(_) => {}
        None => println!("No stations played; nothing saved"),
    }
    Ok(())
}
