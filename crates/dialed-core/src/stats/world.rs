//! Around the World results.

use serde::Serialize;

use super::percent;
use crate::session::{History, Summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorldStats {
    pub accuracy: u32,
    /// Furthest distance ever reached in a World game.
    pub peak_distance: u32,
    pub session_count: usize,
}

/// Aggregate over World sessions, `None` when none were played.
pub fn compute_world_stats(history: &History) -> Option<WorldStats> {
    let games: Vec<_> = history.practice().filter(|s| s.is_world()).collect();
    if games.is_empty() {
        return None;
    }

    let totals = games
        .iter()
        .fold(Summary::default(), |acc, s| acc.combine(s.summary()));
    let peak_distance = games
        .iter()
        .map(|s| s.rounds.iter().map(|r| r.distance).max().unwrap_or(0))
        .max()
        .unwrap_or(0);

    Some(WorldStats {
        accuracy: percent(totals.made, totals.attempts),
        peak_distance,
        session_count: games.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::SessionDate;
    use crate::session::{PracticeVariant, Round, Session};

    fn world(id: i64, rounds: &[(u32, u32)]) -> Session {
        let rounds = rounds
            .iter()
            .map(|(d, m)| Round::simple(id, *d, *m).unwrap())
            .collect();
        Session::practice(
            id,
            SessionDate::from_ymd(2024, 3, id as u32).unwrap(),
            Some(PracticeVariant::World),
            rounds,
        )
    }

    #[test]
    fn test_world_only() {
        let standard = Session::practice(
            9,
            SessionDate::from_ymd(2024, 3, 9).unwrap(),
            None,
            vec![Round::simple(1, 50, 5).unwrap()],
        );
        assert!(compute_world_stats(&History::from_sessions(vec![standard.clone()])).is_none());

        let history = History::from_sessions(vec![
            standard,
            world(1, &[(10, 5), (15, 4), (20, 1)]),
            world(2, &[(10, 5), (15, 5), (20, 5), (25, 3), (30, 0)]),
            world(3, &[]),
        ]);
        let stats = compute_world_stats(&history).unwrap();
        assert_eq!(stats.session_count, 3);
        assert_eq!(stats.peak_distance, 30);
        // 28 of 40
        assert_eq!(stats.accuracy, 70);
    }
}
