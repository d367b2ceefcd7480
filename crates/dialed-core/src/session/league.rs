//! League night scoring.
//!
//! A league night is three rounds over five stations. Station `n` is worth
//! `n` points per make, so a perfect round scores `5 * (1+2+3+4+5) = 75`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::lenient;

pub const LEAGUE_ROUNDS: u8 = 3;
pub const LEAGUE_STATIONS: u8 = 5;

/// Stations 1-3 form Circle 1.
pub const CIRCLE_ONE: [u8; 3] = [1, 2, 3];
/// Stations 4-5 form Circle 2.
pub const CIRCLE_TWO: [u8; 2] = [4, 5];

/// Station number → makes out of 5 for one round.
///
/// Reading is lenient: makes go through the same count coercion as practice
/// rounds and non-numeric station keys are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StationMap(BTreeMap<u8, u32>);

impl StationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn makes(&self, station: u8) -> u32 {
        self.0.get(&station).copied().unwrap_or(0)
    }

    pub fn is_recorded(&self, station: u8) -> bool {
        self.0.contains_key(&station)
    }

    pub fn set(&mut self, station: u8, makes: u32) {
        self.0.insert(station, makes);
    }

    /// Weighted score: Σ makes × station, saturating.
    pub fn score(&self) -> u32 {
        self.0.iter().fold(0u32, |acc, (station, makes)| {
            acc.saturating_add(makes.saturating_mul(u32::from(*station)))
        })
    }
}

impl StationMap {
    fn from_value(value: &Value) -> Self {
        lenient::u8_keyed(value)
            .map(|(station, makes)| (station, lenient::value_to_u32(makes)))
            .collect()
    }
}

impl<'de> Deserialize<'de> for StationMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_value(&Value::deserialize(deserializer)?))
    }
}

impl FromIterator<(u8, u32)> for StationMap {
    fn from_iter<I: IntoIterator<Item = (u8, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Round number → station results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LeagueDetails(BTreeMap<u8, StationMap>);

impl LeagueDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn round(&self, round: u8) -> Option<&StationMap> {
        self.0.get(&round)
    }

    pub fn round_mut(&mut self, round: u8) -> &mut StationMap {
        self.0.entry(round).or_default()
    }

    pub fn makes(&self, round: u8, station: u8) -> u32 {
        self.round(round).map(|r| r.makes(station)).unwrap_or(0)
    }

    pub fn round_score(&self, round: u8) -> u32 {
        self.round(round).map(StationMap::score).unwrap_or(0)
    }

    /// Per-round scores for rounds 1..=3.
    pub fn round_scores(&self) -> [u32; LEAGUE_ROUNDS as usize] {
        [self.round_score(1), self.round_score(2), self.round_score(3)]
    }

    /// Σ over rounds 1..=3 of the weighted round score.
    pub fn total(&self) -> u32 {
        (1..=LEAGUE_ROUNDS).fold(0u32, |acc, r| acc.saturating_add(self.round_score(r)))
    }
}

impl<'de> Deserialize<'de> for LeagueDetails {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(lenient::u8_keyed(&value)
            .map(|(round, stations)| (round, StationMap::from_value(stations)))
            .collect())
    }
}

impl FromIterator<(u8, StationMap)> for LeagueDetails {
    fn from_iter<I: IntoIterator<Item = (u8, StationMap)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
