//! Consecutive-day practice streaks.

use serde::Serialize;

use crate::date::SessionDate;
use crate::session::History;

/// Headline and encouragement shown next to the streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub title: String,
    pub msg: String,
}

impl Milestone {
    fn new(title: &str, msg: &str) -> Self {
        Self {
            title: title.to_string(),
            msg: msg.to_string(),
        }
    }
}

/// Current streak as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakSummary {
    /// Streak shown in the UI pill; a lone active day reads as 0.
    pub streak: u32,
    /// Raw run of consecutive practice days ending today or yesterday.
    pub consecutive_days: u32,
    pub milestone: Milestone,
}

/// Whether the most recent practice date keeps a streak alive.
pub(crate) fn is_recent(latest: SessionDate, today: SessionDate) -> bool {
    latest == today || latest == today.pred()
}

/// Length of the run of consecutive days at the head of `dates` (descending).
fn leading_run(dates: &[SessionDate]) -> u32 {
    let Some(first) = dates.first() else {
        return 0;
    };
    let mut expected = *first;
    let mut count = 0;
    for date in dates {
        if *date != expected {
            break;
        }
        count += 1;
        expected = expected.pred();
    }
    count
}

/// Milestone text for a raw consecutive-day count.
pub fn milestone_for(consecutive_days: u32) -> Milestone {
    match consecutive_days {
        0 => Milestone::new(
            "Cold Start",
            "No active streak right now. Grab your putters and get Dialed!",
        ),
        30 => Milestone::new(
            "Legendary Consistency",
            "A full month of progress. You are officially in the top tier of dedicated putters!",
        ),
        21 => Milestone::new(
            "Disc Golf Addict",
            "Three weeks down. This isn't just practice anymore; it's a lifestyle.",
        ),
        14 => Milestone::new(
            "Fortnight of Fire",
            "Two weeks straight! Your muscle memory is locking in.",
        ),
        7 => Milestone::new(
            "Weekly Warrior",
            "Seven days in a row. That's a full cycle of commitment, don't stop now!",
        ),
        3 => Milestone::new(
            "Building Momentum",
            "Three days deep. The hardest part is starting, and you've already cleared that hurdle.",
        ),
        2 => Milestone::new(
            "Double Down",
            "Back-to-back days! You've officially started a streak.",
        ),
        // Still encouraged on day one even though the pill reads 0.
        1 => Milestone::new(
            "Day One",
            "The journey begins. Log another session tomorrow to officially start your streak!",
        ),
        n => Milestone {
            title: "Dialed In".to_string(),
            msg: format!(
                "You've got a {}-day streak going. Every putt today is building a better game for tomorrow.",
                n
            ),
        },
    }
}

/// Current practice streak ending today or yesterday.
///
/// League nights do not count; World games do.
pub fn compute_streak(history: &History, today: SessionDate) -> StreakSummary {
    let dates = history.practice_dates();

    let consecutive_days = match dates.first() {
        Some(latest) if is_recent(*latest, today) => leading_run(&dates),
        _ => 0,
    };
    let streak = if consecutive_days >= 2 { consecutive_days } else { 0 };

    StreakSummary {
        streak,
        consecutive_days,
        milestone: milestone_for(consecutive_days),
    }
}

/// Longest run of consecutive practice days anywhere in the history.
pub fn longest_streak(history: &History) -> u32 {
    let mut dates = history.practice_dates();
    if dates.is_empty() {
        return 0;
    }
    dates.reverse();

    let mut longest = 1;
    let mut current = 1;
    for pair in dates.windows(2) {
        if pair[0].is_day_before(&pair[1]) {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 1;
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Round, Session};

    fn today() -> SessionDate {
        SessionDate::from_ymd(2024, 6, 15).unwrap()
    }

    fn days_ago(n: u64) -> SessionDate {
        let mut date = today();
        for _ in 0..n {
            date = date.pred();
        }
        date
    }

    fn practice_on(id: i64, date: SessionDate) -> Session {
        Session::practice(id, date, None, vec![Round::simple(id, 20, 4).unwrap()])
    }

    fn run_ending(offset: u64, len: u64) -> History {
        History::from_sessions(
            (0..len)
                .map(|i| practice_on(i as i64 + 1, days_ago(offset + i)))
                .collect(),
        )
    }

    #[test]
    fn test_empty_history_is_cold() {
        let summary = compute_streak(&History::new(), today());
        assert_eq!(summary.streak, 0);
        assert_eq!(summary.milestone.title, "Cold Start");
    }

    #[test]
    fn test_stale_history_is_dead() {
        let summary = compute_streak(&run_ending(2, 10), today());
        assert_eq!(summary.streak, 0);
        assert_eq!(summary.consecutive_days, 0);
        assert_eq!(summary.milestone.title, "Cold Start");
    }

    #[test]
    fn test_day_one_reads_zero() {
        let summary = compute_streak(&run_ending(0, 1), today());
        assert_eq!(summary.streak, 0);
        assert_eq!(summary.consecutive_days, 1);
        assert_eq!(summary.milestone.title, "Day One");
    }

    #[test]
    fn test_streak_alive_from_yesterday() {
        let summary = compute_streak(&run_ending(1, 3), today());
        assert_eq!(summary.streak, 3);
        assert_eq!(summary.milestone.title, "Building Momentum");
    }

    #[test]
    fn test_milestone_table() {
        for (days, title) in [
            (2, "Double Down"),
            (7, "Weekly Warrior"),
            (14, "Fortnight of Fire"),
            (21, "Disc Golf Addict"),
            (30, "Legendary Consistency"),
        ] {
            let summary = compute_streak(&run_ending(0, days), today());
            assert_eq!(summary.streak, days as u32);
            assert_eq!(summary.milestone.title, title);
        }
    }

    #[test]
    fn test_generic_milestone_interpolates() {
        let summary = compute_streak(&run_ending(0, 5), today());
        assert_eq!(summary.milestone.title, "Dialed In");
        assert!(summary.milestone.msg.contains("5-day streak"));
    }

    #[test]
    fn test_gap_stops_count() {
        let history = History::from_sessions(vec![
            practice_on(1, days_ago(0)),
            practice_on(2, days_ago(1)),
            practice_on(3, days_ago(3)),
        ]);
        assert_eq!(compute_streak(&history, today()).streak, 2);
    }

    #[test]
    fn test_league_nights_do_not_count() {
        let mut sessions = vec![practice_on(1, days_ago(0))];
        sessions.push(Session::legacy_league(2, days_ago(1), 120));
        let summary = compute_streak(&History::from_sessions(sessions), today());
        assert_eq!(summary.consecutive_days, 1);
    }

    #[test]
    fn test_longest_streak() {
        let history = History::from_sessions(vec![
            practice_on(1, days_ago(0)),
            practice_on(2, days_ago(10)),
            practice_on(3, days_ago(11)),
            practice_on(4, days_ago(12)),
            practice_on(5, days_ago(20)),
        ]);
        assert_eq!(longest_streak(&history), 3);
        assert_eq!(longest_streak(&History::new()), 0);
    }
}
