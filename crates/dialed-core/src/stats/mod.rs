//! Derived statistics over the session history.
//!
//! Everything here is a pure function of the history (and, for streaks, of
//! "today"). Nothing is cached; callers recompute whenever the history changes.

mod league;
mod practice;
mod pro;
mod streak;
mod streak_stats;
mod world;

use serde::Serialize;
use std::collections::BTreeMap;

use crate::session::Session;

pub use league::{CircleAccuracy, LeagueTrend, LeagueTrends, compute_league_trends};
pub use practice::{PracticeTrends, compute_practice_trends};
pub use pro::{ProStats, compute_pro_stats};
pub use streak::{Milestone, StreakSummary, compute_streak, longest_streak, milestone_for};
pub use streak_stats::{StreakStats, compute_streak_stats};
pub use world::{WorldStats, compute_world_stats};

/// Rounded percentage, 0 when there were no attempts.
pub fn percent(made: u32, attempts: u32) -> u32 {
    if attempts == 0 {
        return 0;
    }
    ((f64::from(made) / f64::from(attempts)) * 100.0).round() as u32
}

/// Make/attempt totals at one distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DistanceStat {
    pub distance: u32,
    pub made: u32,
    pub attempts: u32,
    pub pct: u32,
}

/// Per-distance totals across every round of `sessions`, ascending by distance.
pub(crate) fn distance_breakdown<'a>(
    sessions: impl IntoIterator<Item = &'a Session>,
) -> Vec<DistanceStat> {
    let mut totals: BTreeMap<u32, (u32, u32)> = BTreeMap::new();
    for round in sessions.into_iter().flat_map(|s| s.rounds.iter()) {
        let entry = totals.entry(round.distance).or_default();
        entry.0 = entry.0.saturating_add(round.made);
        entry.1 = entry.1.saturating_add(round.attempts);
    }
    totals
        .into_iter()
        .map(|(distance, (made, attempts))| DistanceStat {
            distance,
            made,
            attempts,
            pct: percent(made, attempts),
        })
        .collect()
}
