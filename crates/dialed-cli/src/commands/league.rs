use anyhow::Result;

use dialed_application::{PracticeTracker, SaveOutcome};
use dialed_core::scoring::LeagueScorecard;
use dialed_core::session::LEAGUE_STATIONS;

use super::input::{Prompt, parse_made};

/// Walks the scorecard station by station. `b` goes back a round, `q` quits
/// without saving.
pub async fn run(tracker: &PracticeTracker) -> Result<()> {
    let mut card = LeagueScorecard::new();
    let mut prompt = Prompt::terminal()?;
    println!("🏆 League night | made (0-5) per station | b previous round | q quit");

    'rounds: loop {
        let round = card.current_round();
        println!("Round {}", round);

        let mut station = 1;
        while station <= LEAGUE_STATIONS {
            let Some(line) = prompt.ask(&format!("  station {} (×{})>", station, station))? else {
                return Ok(());
            };
            match line.as_str() {
                "q" | "quit" => return Ok(()),
                "b" | "back" => {
                    if card.previous_round().is_err() {
                        println!("  Already on round 1");
                    }
                    continue 'rounds;
                }
                _ => {}
            }
            match parse_made(&line) {
                Some(made) => {
                    card.record_station(station, made)?;
                    station += 1;
                }
                None => println!("  ? made (0-5)"),
            }
        }

        println!("  Round {} score: {}", round, card.round_score(round));
        if card.is_last_round() {
            break;
        }
        card.next_round()?;
    }

    let total = card.total_score();
    if let SaveOutcome::Saved(_) = tracker.finish_league(card).await? {
        println!("✅ League night saved: {} points", total);
    }

    if let Some(trend) = tracker.stats().await.league.and_then(|l| l.trend) {
        println!("📈 {} vs last night", trend.display_diff());
    }
    Ok(())
}
