//! Domain core of the Dialed putting tracker.
//!
//! Session records, the derived statistics, the Around the World engine and
//! the session builders are all pure and synchronous. Persistence and
//! identity are reached through the async traits in [`user`].

pub mod config;
pub mod date;
pub mod error;
pub mod scoring;
pub mod session;
pub mod state;
pub mod stats;
pub mod user;
pub mod world;

mod lenient;

// Re-export common error type
pub use error::{DialedError, Result};
