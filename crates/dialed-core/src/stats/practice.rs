//! All-time practice trends.

use serde::Serialize;

use super::{DistanceStat, distance_breakdown, percent};
use crate::session::{History, Session, Summary};

/// Sessions shown in the performance trend graph.
pub const SESSION_TREND_LEN: usize = 10;
/// Attempts required at a distance before it can be called the best one.
pub const BEST_DISTANCE_MIN_ATTEMPTS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PracticeTrends {
    pub overall_pct: u32,
    /// Accuracy of the most recent sessions, oldest first.
    pub session_trend: Vec<u32>,
    pub distances: Vec<DistanceStat>,
    pub best_dist: Option<DistanceStat>,
}

/// Practice accuracy across the whole history, `None` without practice sessions.
pub fn compute_practice_trends(history: &History) -> Option<PracticeTrends> {
    let mut sessions: Vec<&Session> = history.practice().collect();
    if sessions.is_empty() {
        return None;
    }
    sessions.sort_by(|a, b| a.date.cmp(&b.date));

    let trend_start = sessions.len().saturating_sub(SESSION_TREND_LEN);
    let session_trend = sessions[trend_start..]
        .iter()
        .map(|s| {
            let summary = s.summary();
            percent(summary.made, summary.attempts)
        })
        .collect();

    let totals = sessions
        .iter()
        .fold(Summary::default(), |acc, s| acc.combine(s.summary()));

    let distances = distance_breakdown(sessions.iter().copied());

    // Ascending distance order, so a tie goes to the shorter distance.
    let best_dist = distances
        .iter()
        .filter(|d| d.attempts >= BEST_DISTANCE_MIN_ATTEMPTS)
        .fold(None::<DistanceStat>, |best, d| match best {
            Some(b) if b.pct >= d.pct => Some(b),
            _ => Some(*d),
        });

    Some(PracticeTrends {
        overall_pct: percent(totals.made, totals.attempts),
        session_trend,
        distances,
        best_dist,
    })
}
