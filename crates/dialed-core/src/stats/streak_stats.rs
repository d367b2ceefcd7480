//! Totals for the days inside the current streak.

use serde::Serialize;

use super::streak::is_recent;
use super::{DistanceStat, distance_breakdown, percent};
use crate::date::SessionDate;
use crate::session::{History, Summary};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreakStats {
    /// Days covered; 1 for a "Day One" streak the pill shows as 0.
    pub current: u32,
    /// Streak days, most recent first.
    pub involved_dates: Vec<SessionDate>,
    pub made: u32,
    pub att: u32,
    pub pct: u32,
    pub dist_data: Vec<DistanceStat>,
    /// Accuracy per streak day, oldest first.
    pub daily_trend: Vec<u32>,
}

/// Breaks down the practice inside a streak of `streak` days.
pub fn compute_streak_stats(history: &History, streak: u32, today: SessionDate) -> StreakStats {
    let dates = history.practice_dates();
    let Some(latest) = dates.first() else {
        return StreakStats::default();
    };

    let effective = if streak == 0 {
        if !is_recent(*latest, today) {
            return StreakStats::default();
        }
        1
    } else {
        streak
    };

    let involved_dates: Vec<SessionDate> = dates.iter().take(effective as usize).copied().collect();

    let daily_trend = involved_dates
        .iter()
        .rev()
        .map(|date| {
            let day = history
                .practice()
                .filter(|s| s.date == *date)
                .fold(Summary::default(), |acc, s| acc.combine(s.summary()));
            percent(day.made, day.attempts)
        })
        .collect();

    let in_streak: Vec<_> = history
        .practice()
        .filter(|s| involved_dates.contains(&s.date))
        .collect();
    let totals = in_streak
        .iter()
        .fold(Summary::default(), |acc, s| acc.combine(s.summary()));

    StreakStats {
        current: effective,
        involved_dates,
        made: totals.made,
        att: totals.attempts,
        pct: percent(totals.made, totals.attempts),
        dist_data: distance_breakdown(in_streak.iter().copied()),
        daily_trend,
    }
}
