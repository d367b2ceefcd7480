//! League night scorecards.

use crate::date::SessionDate;
use crate::error::{DialedError, Result};
use crate::session::{
    LEAGUE_ROUNDS, LEAGUE_STATIONS, LeagueDetails, Session, StationMap, validate_made,
};

/// Scores of a league night being played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueScorecard {
    current_round: u8,
    details: LeagueDetails,
}

impl Default for LeagueScorecard {
    fn default() -> Self {
        Self::new()
    }
}

impl LeagueScorecard {
    pub fn new() -> Self {
        let details = (1..=LEAGUE_ROUNDS).map(|r| (r, StationMap::new())).collect();
        Self {
            current_round: 1,
            details,
        }
    }

    pub fn current_round(&self) -> u8 {
        self.current_round
    }

    pub fn is_last_round(&self) -> bool {
        self.current_round == LEAGUE_ROUNDS
    }

    pub fn details(&self) -> &LeagueDetails {
        &self.details
    }

    /// Records (or corrects) a station of the current round.
    pub fn record_station(&mut self, station: u8, made: u32) -> Result<()> {
        if !(1..=LEAGUE_STATIONS).contains(&station) {
            return Err(DialedError::validation(format!(
                "station must be 1-{}, got {}",
                LEAGUE_STATIONS, station
            )));
        }
        validate_made(made)?;
        self.details.round_mut(self.current_round).set(station, made);
        Ok(())
    }

    pub fn next_round(&mut self) -> Result<u8> {
        if self.is_last_round() {
            return Err(DialedError::validation("already on the last round"));
        }
        self.current_round += 1;
        Ok(self.current_round)
    }

    pub fn previous_round(&mut self) -> Result<u8> {
        if self.current_round == 1 {
            return Err(DialedError::validation("already on the first round"));
        }
        self.current_round -= 1;
        Ok(self.current_round)
    }

    pub fn round_score(&self, round: u8) -> u32 {
        self.details.round_score(round)
    }

    pub fn total_score(&self) -> u32 {
        self.details.total()
    }

    pub fn finish(self, id: i64, date: SessionDate) -> Session {
        Session::league(id, date, self.details)
    }
}
