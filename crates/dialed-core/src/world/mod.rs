//! Around the World: a progressive ladder game.
//!
//! The player works up a fixed ladder of distances. Each station is five
//! putts; making `pass` advances, making fewer than `push` falls back one
//! station, anything else holds. Passing the last station wins the game.

mod engine;
mod rules;

pub use engine::{Movement, WorldGame, WorldOutcome};
pub use rules::{
    FINAL_DISTANCE, LADDER, START_DISTANCE, StationRule, Unlock, is_ladder_distance, rule_for,
};
