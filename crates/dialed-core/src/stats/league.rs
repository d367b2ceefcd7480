//! League night trends.

use serde::Serialize;

use super::percent;
use crate::session::{
    ATTEMPTS_PER_ROUND, CIRCLE_ONE, CIRCLE_TWO, History, LEAGUE_ROUNDS, Session,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CircleAccuracy {
    pub pct: u32,
}

/// Latest league night compared with the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeagueTrend {
    pub diff: i64,
    pub is_positive: bool,
    pub latest_total: u32,
    pub previous_total: u32,
}

impl LeagueTrend {
    /// `+N` for an improvement, plain `N` otherwise.
    pub fn display_diff(&self) -> String {
        if self.diff > 0 {
            format!("+{}", self.diff)
        } else {
            self.diff.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeagueTrends {
    /// Average weighted score of rounds 1..=3 over granular nights.
    pub averages: [u32; LEAGUE_ROUNDS as usize],
    pub has_granular: bool,
    pub max_avg: u32,
    pub c1: CircleAccuracy,
    pub c2: CircleAccuracy,
    pub trend: Option<LeagueTrend>,
    pub season_avg: u32,
    pub personal_best: u32,
}

/// League statistics, `None` without league nights.
///
/// Legacy imports only contribute to the season average, personal best and
/// trend; round averages and circle accuracy need station detail.
pub fn compute_league_trends(history: &History) -> Option<LeagueTrends> {
    let mut nights: Vec<&Session> = history.league().collect();
    if nights.is_empty() {
        return None;
    }
    nights.sort_by(|a, b| b.date.cmp(&a.date));

    let granular: Vec<&Session> = nights.iter().copied().filter(|s| !s.is_legacy).collect();

    let mut round_sums = [0u32; LEAGUE_ROUNDS as usize];
    let (mut c1_made, mut c1_att, mut c2_made, mut c2_att) = (0u32, 0u32, 0u32, 0u32);

    for night in &granular {
        let details = night.league_details();
        for round in 1..=LEAGUE_ROUNDS {
            let slot = &mut round_sums[usize::from(round - 1)];
            *slot = slot.saturating_add(details.round_score(round));
            for station in CIRCLE_ONE {
                c1_made = c1_made.saturating_add(details.makes(round, station));
                c1_att = c1_att.saturating_add(ATTEMPTS_PER_ROUND);
            }
            for station in CIRCLE_TWO {
                c2_made = c2_made.saturating_add(details.makes(round, station));
                c2_att = c2_att.saturating_add(ATTEMPTS_PER_ROUND);
            }
        }
    }

    let totals: Vec<u32> = nights.iter().map(|s| s.league_total()).collect();
    let season_sum: u64 = totals.iter().copied().map(u64::from).sum();
    let season_avg = (season_sum as f64 / totals.len() as f64).round() as u32;
    let personal_best = totals.iter().copied().max().unwrap_or(0);

    let divisor = granular.len().max(1) as f64;
    let averages = round_sums.map(|sum| (f64::from(sum) / divisor).round() as u32);

    let trend = match totals.as_slice() {
        [latest, previous, ..] => {
            let diff = i64::from(*latest) - i64::from(*previous);
            Some(LeagueTrend {
                diff,
                is_positive: diff >= 0,
                latest_total: *latest,
                previous_total: *previous,
            })
        }
        _ => None,
    };

    Some(LeagueTrends {
        averages,
        has_granular: !granular.is_empty(),
        max_avg: averages.iter().copied().max().unwrap_or(0),
        c1: CircleAccuracy {
            pct: percent(c1_made, c1_att),
        },
        c2: CircleAccuracy {
            pct: percent(c2_made, c2_att),
        },
        trend,
        season_avg,
        personal_best,
    })
}
