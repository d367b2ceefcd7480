//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the `Session` record and its summary
//! - `round`: practice rounds (`Round`)
//! - `league`: league night station maps and weighted scoring
//! - `history`: the ordered session list and its rewrite operations
//! - `merge`: same-day practice merge

mod history;
mod league;
mod merge;
mod model;
mod round;

// Re-export public API
pub use history::{History, HistoryFilter};
pub use league::{
    CIRCLE_ONE, CIRCLE_TWO, LEAGUE_ROUNDS, LEAGUE_STATIONS, LeagueDetails, StationMap,
};
pub use merge::{is_mergeable_pair, merge_sessions};
pub use model::{PracticeVariant, Session, SessionType, Summary};
pub use round::{ATTEMPTS_PER_ROUND, Round};

pub(crate) use round::validate_made;
