//! Application layer for Dialed.
//!
//! [`PracticeTracker`] owns the application state and runs every use case
//! against the identity, document and draft collaborators.

pub mod clock;
pub mod tracker;

pub use clock::{Clock, FixedClock, SystemClock};
pub use tracker::{MergePolicy, PracticeTracker, SaveOutcome};
