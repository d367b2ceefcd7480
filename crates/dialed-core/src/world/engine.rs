//! Around the World game state.

use serde::{Deserialize, Serialize};

use super::rules::{self, LADDER, START_DISTANCE, StationRule, Unlock};
use crate::date::SessionDate;
use crate::error::{DialedError, Result};
use crate::session::{ATTEMPTS_PER_ROUND, PracticeVariant, Round, Session, validate_made};

/// Where a logged station sent the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Movement {
    Advanced { from: u32, to: u32 },
    Held { at: u32 },
    Retreated { from: u32, to: u32 },
    Completed,
}

/// Result of logging one station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldOutcome {
    pub round: Round,
    pub movement: Movement,
    pub unlock: Option<Unlock>,
}

/// A game in progress. Rounds are kept newest-first like every practice session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldGame {
    current_distance: u32,
    highest_unlocked: u32,
    made_this_station: u32,
    is_complete: bool,
    rounds: Vec<Round>,
}

impl Default for WorldGame {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldGame {
    pub fn new() -> Self {
        Self {
            current_distance: START_DISTANCE,
            highest_unlocked: START_DISTANCE,
            made_this_station: 0,
            is_complete: false,
            rounds: Vec::new(),
        }
    }

    pub fn current_distance(&self) -> u32 {
        self.current_distance
    }

    pub fn highest_unlocked(&self) -> u32 {
        self.highest_unlocked
    }

    pub fn made_this_station(&self) -> u32 {
        self.made_this_station
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn current_rule(&self) -> &'static StationRule {
        // current_distance only ever takes ladder values
        rules::rule_for(self.current_distance).unwrap_or(&LADDER[0])
    }

    /// Stations visible to the player: 40 and 50 stay hidden until reached.
    pub fn visible_stations(&self) -> impl Iterator<Item = u32> + '_ {
        LADDER
            .iter()
            .map(|r| r.distance)
            .filter(|d| is_visible(*d, self.highest_unlocked))
    }

    /// Nudges the made counter, clamped to 0..=5.
    pub fn adjust(&mut self, delta: i32) -> u32 {
        let next = (self.made_this_station as i32 + delta).clamp(0, ATTEMPTS_PER_ROUND as i32);
        self.made_this_station = next as u32;
        self.made_this_station
    }

    /// Logs the counter accumulated with [`adjust`](Self::adjust).
    pub fn log_current(&mut self, round_id: i64) -> Result<WorldOutcome> {
        self.log(round_id, self.made_this_station)
    }

    /// Records a station and moves along the ladder.
    ///
    /// The round is kept whatever the outcome. Fails once the game is won or
    /// when `made` exceeds the five attempts.
    pub fn log(&mut self, round_id: i64, made: u32) -> Result<WorldOutcome> {
        if self.is_complete {
            return Err(DialedError::validation("the world has already been conquered"));
        }
        validate_made(made)?;

        let from = self.current_distance;
        let round = Round::simple(round_id, from, made)?;
        self.rounds.insert(0, round.clone());
        self.made_this_station = 0;

        let index = rules::position(from).unwrap_or(0);
        let rule = &LADDER[index];

        if made >= rule.pass {
            let Some(next) = LADDER.get(index + 1) else {
                self.is_complete = true;
                tracing::debug!("world game completed");
                return Ok(WorldOutcome {
                    round,
                    movement: Movement::Completed,
                    unlock: Some(Unlock::Victory),
                });
            };
            let unlock = next.unlock.filter(|_| self.highest_unlocked < next.distance);
            self.move_to(next.distance);
            return Ok(WorldOutcome {
                round,
                movement: Movement::Advanced {
                    from,
                    to: next.distance,
                },
                unlock,
            });
        }

        let movement = if rule.push > 0 && made < rule.push && index > 0 {
            let to = LADDER[index - 1].distance;
            self.move_to(to);
            Movement::Retreated { from, to }
        } else {
            Movement::Held { at: from }
        };

        Ok(WorldOutcome {
            round,
            movement,
            unlock: None,
        })
    }

    fn move_to(&mut self, distance: u32) {
        self.current_distance = distance;
        self.highest_unlocked = self.highest_unlocked.max(distance);
    }

    /// The finished World session, `None` if nothing was logged.
    pub fn finish(self, id: i64, date: SessionDate) -> Option<Session> {
        if self.rounds.is_empty() {
            return None;
        }
        Some(Session::practice(
            id,
            date,
            Some(PracticeVariant::World),
            self.rounds,
        ))
    }
}

fn is_visible(distance: u32, highest_unlocked: u32) -> bool {
    match rules::rule_for(distance).and_then(|r| r.unlock) {
        Some(_) => distance <= highest_unlocked,
        None => true,
    }
}
