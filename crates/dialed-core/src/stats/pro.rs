//! Putt-by-putt statistics from Pro scoring.

use serde::Serialize;

use super::percent;
use crate::session::{ATTEMPTS_PER_ROUND, History};

const POSITIONS: usize = ATTEMPTS_PER_ROUND as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProStats {
    /// Make rate of the first putt of each round.
    pub cold_start_pct: u32,
    /// Make rate of putt 1..=5 within a round.
    pub position_pcts: [u32; POSITIONS],
    /// Rounds contributing to the figures above.
    pub total_cold_starts: u32,
}

/// Pro statistics over every practice round with a full putt sequence.
pub fn compute_pro_stats(history: &History) -> Option<ProStats> {
    let mut rounds = 0u32;
    let mut made_at = [0u32; POSITIONS];

    for round in history
        .practice()
        .flat_map(|s| s.rounds.iter())
        .filter(|r| r.has_full_sequence())
    {
        rounds += 1;
        for (slot, made) in made_at.iter_mut().zip(&round.putt_sequence) {
            if *made {
                *slot += 1;
            }
        }
    }

    if rounds == 0 {
        return None;
    }

    Some(ProStats {
        cold_start_pct: percent(made_at[0], rounds),
        position_pcts: made_at.map(|made| percent(made, rounds)),
        total_cold_starts: rounds,
    })
}
