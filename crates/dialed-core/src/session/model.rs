//! Session domain model.
//!
//! The wire shape is a flat record whose populated fields depend on `type`:
//! practice sessions carry `summary` + `rounds`, league nights carry `score`,
//! `roundScores` and `details`, and imported legacy league nights carry only
//! `totalScore`. Constructors below build each shape with its invariants.

use serde::{Deserialize, Serialize};

use super::league::{LEAGUE_ROUNDS, LeagueDetails};
use super::round::Round;
use crate::date::SessionDate;
use crate::lenient;

/// Top-level session category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SessionType {
    Practice,
    League,
}

/// Optional practice variant tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PracticeVariant {
    /// Around the World ladder game.
    World,
}

/// Aggregate make/attempt counts of a practice session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub attempts: u32,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub made: u32,
}

impl Summary {
    /// Sums made/attempts over the given rounds.
    pub fn of_rounds<'a>(rounds: impl IntoIterator<Item = &'a Round>) -> Self {
        rounds.into_iter().fold(Self::default(), |acc, r| {
            acc.combine(Self {
                attempts: r.attempts,
                made: r.made,
            })
        })
    }

    /// Field-wise sum, saturating at `u32::MAX`.
    pub fn combine(self, other: Summary) -> Self {
        Self {
            attempts: self.attempts.saturating_add(other.attempts),
            made: self.made.saturating_add(other.made),
        }
    }
}

/// A finished practice session or league night.
///
/// Sessions are immutable once appended to the history; the only rewrites are
/// deletion, same-day merge and clearing the whole history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Creation timestamp in ms since the epoch; doubles as identity.
    pub id: i64,
    /// Local calendar day the session was recorded on.
    pub date: SessionDate,
    #[serde(rename = "type")]
    pub session_type: SessionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<PracticeVariant>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_legacy: bool,

    // Practice fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rounds: Vec<Round>,

    // League fields
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_u32"
    )]
    pub score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_scores: Option<[u32; LEAGUE_ROUNDS as usize]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<LeagueDetails>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_u32"
    )]
    pub total_score: Option<u32>,
}

impl Session {
    /// A standard or World practice session. The summary is derived from the rounds.
    pub fn practice(
        id: i64,
        date: SessionDate,
        variant: Option<PracticeVariant>,
        rounds: Vec<Round>,
    ) -> Self {
        Self {
            id,
            date,
            session_type: SessionType::Practice,
            sub_type: variant,
            is_legacy: false,
            summary: Some(Summary::of_rounds(&rounds)),
            rounds,
            score: None,
            round_scores: None,
            details: None,
            total_score: None,
        }
    }

    /// A league night with per-station detail.
    pub fn league(id: i64, date: SessionDate, details: LeagueDetails) -> Self {
        Self {
            id,
            date,
            session_type: SessionType::League,
            sub_type: None,
            is_legacy: false,
            summary: None,
            rounds: Vec::new(),
            score: Some(details.total()),
            round_scores: Some(details.round_scores()),
            details: Some(details),
            total_score: None,
        }
    }

    /// An imported league night with only its final score.
    pub fn legacy_league(id: i64, date: SessionDate, total_score: u32) -> Self {
        Self {
            id,
            date,
            session_type: SessionType::League,
            sub_type: None,
            is_legacy: true,
            summary: None,
            rounds: Vec::new(),
            score: None,
            round_scores: None,
            details: None,
            total_score: Some(total_score),
        }
    }

    pub fn is_practice(&self) -> bool {
        self.session_type == SessionType::Practice
    }

    pub fn is_league(&self) -> bool {
        self.session_type == SessionType::League
    }

    pub fn is_world(&self) -> bool {
        self.sub_type == Some(PracticeVariant::World)
    }

    /// Practice session that is neither World nor legacy: the only kind
    /// that can be merged with a same-day twin.
    pub fn is_standard_practice(&self) -> bool {
        self.is_practice() && self.sub_type.is_none() && !self.is_legacy
    }

    /// Summary counts, zero when absent.
    pub fn summary(&self) -> Summary {
        self.summary.unwrap_or_default()
    }

    /// League detail, empty when absent.
    pub fn league_details(&self) -> LeagueDetails {
        self.details.clone().unwrap_or_default()
    }

    /// League total: the stored total for legacy imports, otherwise recomputed
    /// from the station detail.
    pub fn league_total(&self) -> u32 {
        if self.is_legacy {
            return self.total_score.unwrap_or(0);
        }
        self.details.as_ref().map(LeagueDetails::total).unwrap_or(0)
    }

    /// Rounds in the order they were thrown (storage is newest-first).
    pub fn chronological_rounds(&self) -> impl Iterator<Item = &Round> {
        self.rounds.iter().rev()
    }

    /// Rounds where every putt dropped. The 10ft warm-up of a World game
    /// is a forced 5/5 and does not count.
    pub fn perfect_rounds(&self) -> usize {
        if self.is_league() {
            return 0;
        }
        self.rounds
            .iter()
            .filter(|r| !(self.is_world() && r.distance == 10))
            .filter(|r| r.is_perfect())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::league::StationMap;

    fn date(s: &str) -> SessionDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_practice_summary_matches_rounds() {
        let rounds = vec![
            Round::simple(2, 20, 4).unwrap(),
            Round::simple(1, 25, 3).unwrap(),
        ];
        let session = Session::practice(10, date("1/1/2024"), None, rounds);
        assert_eq!(session.summary(), Summary { attempts: 10, made: 7 });
        assert!(session.is_standard_practice());
    }

    #[test]
    fn test_league_score_invariant() {
        let details: LeagueDetails = [
            (1, [(1, 5), (5, 1)].into_iter().collect::<StationMap>()),
            (2, [(3, 2)].into_iter().collect()),
        ]
        .into_iter()
        .collect();
        let session = Session::league(1, date("1/1/2024"), details);
        assert_eq!(session.score, Some(16));
        assert_eq!(session.round_scores, Some([10, 6, 0]));
        assert_eq!(session.league_total(), 16);
    }

    #[test]
    fn test_legacy_total() {
        let session = Session::legacy_league(1, date("1/1/2024"), 88);
        assert_eq!(session.league_total(), 88);
        assert!(!session.is_standard_practice());
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{
            "id": 1704067200000,
            "date": "01/01/2024",
            "type": "PRACTICE",
            "summary": {"made": 20, "attempts": 25},
            "rounds": [
                {"distance": 20, "made": 4, "attempts": 5},
                {"distance": "20", "made": 16, "attempts": 20}
            ]
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert!(session.is_practice());
        assert_eq!(session.summary().made, 20);
        assert_eq!(session.rounds[1].distance, 20);

        let out = serde_json::to_value(&session).unwrap();
        assert_eq!(out["type"], "PRACTICE");
        assert_eq!(out["date"], "1/1/2024");
        assert!(out.get("subType").is_none());
    }

    #[test]
    fn test_world_perfect_rounds_skip_warmup() {
        let rounds = vec![
            Round::simple(3, 15, 5).unwrap(),
            Round::simple(2, 10, 5).unwrap(),
            Round::simple(1, 10, 3).unwrap(),
        ];
        let world = Session::practice(1, date("1/1/2024"), Some(PracticeVariant::World), rounds.clone());
        assert_eq!(world.perfect_rounds(), 1);
        let standard = Session::practice(2, date("1/1/2024"), None, rounds);
        assert_eq!(standard.perfect_rounds(), 2);
    }
}
