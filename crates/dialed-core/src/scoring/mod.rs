//! Session builders.
//!
//! # Module Structure
//!
//! - `practice`: Standard-mode draft, scored Simple or Pro
//! - `league`: three-round league scorecard

mod league;
mod practice;

pub use league::LeagueScorecard;
pub use practice::{DEFAULT_DISTANCE, PracticeDraft, ScoringStyle};
