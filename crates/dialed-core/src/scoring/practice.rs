//! Standard practice drafts.

use serde::{Deserialize, Serialize};

use crate::date::SessionDate;
use crate::error::{DialedError, Result};
use crate::session::{ATTEMPTS_PER_ROUND, Round, Session};
use crate::world::is_ladder_distance;

/// Distance a new draft starts at.
pub const DEFAULT_DISTANCE: u32 = 20;

/// How rounds are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScoringStyle {
    /// Made count only.
    #[default]
    Simple,
    /// Every putt recorded as make or miss.
    Pro,
}

impl std::str::FromStr for ScoringStyle {
    type Err = DialedError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "pro" => Ok(Self::Pro),
            other => Err(DialedError::validation(format!(
                "unknown scoring style '{}'",
                other
            ))),
        }
    }
}

/// Rounds of a Standard session not yet committed to the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeDraft {
    style: ScoringStyle,
    distance: u32,
    rounds: Vec<Round>,
}

impl PracticeDraft {
    pub fn new(style: ScoringStyle) -> Self {
        Self::resume(style, Vec::new())
    }

    /// Picks up a buffer restored from the draft store.
    pub fn resume(style: ScoringStyle, rounds: Vec<Round>) -> Self {
        Self {
            style,
            distance: DEFAULT_DISTANCE,
            rounds,
        }
    }

    pub fn style(&self) -> ScoringStyle {
        self.style
    }

    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// Newest first.
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn set_distance(&mut self, distance: u32) -> Result<()> {
        if !is_ladder_distance(distance) {
            return Err(DialedError::validation(format!(
                "{}ft is not a practice distance",
                distance
            )));
        }
        self.distance = distance;
        Ok(())
    }

    /// Logs a Simple round at the current distance.
    pub fn log_made(&mut self, round_id: i64, made: u32) -> Result<&Round> {
        if self.style == ScoringStyle::Pro {
            return Err(DialedError::validation(
                "pro scoring records a putt sequence, not a made count",
            ));
        }
        let round = Round::simple(round_id, self.distance, made)?;
        Ok(self.push(round))
    }

    /// Logs a Pro round at the current distance.
    pub fn log_sequence(&mut self, round_id: i64, sequence: &[bool]) -> Result<&Round> {
        let sequence: [bool; ATTEMPTS_PER_ROUND as usize] = sequence.try_into().map_err(|_| {
            DialedError::validation(format!(
                "a putt sequence has {} entries, got {}",
                ATTEMPTS_PER_ROUND,
                sequence.len()
            ))
        })?;
        let round = Round::pro(round_id, self.distance, sequence);
        Ok(self.push(round))
    }

    fn push(&mut self, round: Round) -> &Round {
        self.rounds.insert(0, round);
        &self.rounds[0]
    }

    /// Drops the most recent round.
    pub fn undo(&mut self) -> Option<Round> {
        if self.rounds.is_empty() {
            return None;
        }
        Some(self.rounds.remove(0))
    }

    /// The finished session, `None` when nothing was logged.
    pub fn finish(self, id: i64, date: SessionDate) -> Option<Session> {
        if self.rounds.is_empty() {
            return None;
        }
        Some(Session::practice(id, date, None, self.rounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> SessionDate {
        SessionDate::from_ymd(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_simple_draft_finishes() {
        let mut draft = PracticeDraft::new(ScoringStyle::Simple);
        draft.log_made(1, 4).unwrap();
        draft.set_distance(33).unwrap();
        draft.log_made(2, 1).unwrap();
        assert_eq!(draft.rounds()[0].distance, 33);

        let session = draft.finish(10, date()).unwrap();
        assert_eq!(session.summary().made, 5);
        assert_eq!(session.summary().attempts, 10);
        assert!(session.is_standard_practice());
    }

    #[test]
    fn test_empty_draft_yields_nothing() {
        assert!(PracticeDraft::new(ScoringStyle::Pro).finish(1, date()).is_none());
    }

    #[test]
    fn test_off_ladder_distance_rejected() {
        let mut draft = PracticeDraft::new(ScoringStyle::Simple);
        assert!(draft.set_distance(35).is_err());
        assert_eq!(draft.distance(), DEFAULT_DISTANCE);
    }

    #[test]
    fn test_pro_sequence() {
        let mut draft = PracticeDraft::new(ScoringStyle::Pro);
        assert!(draft.log_made(1, 3).is_err());
        assert!(draft.log_sequence(1, &[true, false]).is_err());

        let round = draft.log_sequence(2, &[false, true, true, false, true]).unwrap();
        assert_eq!(round.made, 3);
        assert!(!round.first_putt_made);
        assert_eq!(round.putt_sequence.len(), 5);
    }

    #[test]
    fn test_undo() {
        let mut draft = PracticeDraft::resume(
            ScoringStyle::Simple,
            vec![Round::simple(1, 20, 2).unwrap()],
        );
        draft.log_made(2, 5).unwrap();
        assert_eq!(draft.undo().map(|r| r.id), Some(2));
        assert_eq!(draft.rounds().len(), 1);
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("PRO".parse::<ScoringStyle>().unwrap(), ScoringStyle::Pro);
        assert!("fancy".parse::<ScoringStyle>().is_err());
    }
}
