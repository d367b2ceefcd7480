//! Practice rounds.

use serde::{Deserialize, Serialize};

use crate::error::{DialedError, Result};
use crate::lenient;

/// Every round is five putts from one spot.
pub const ATTEMPTS_PER_ROUND: u32 = 5;

/// One station of a practice session: five putts from a single distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// Creation timestamp in milliseconds since the epoch.
    #[serde(default)]
    pub id: i64,
    /// Distance in feet.
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub distance: u32,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub made: u32,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub attempts: u32,
    /// Per-putt make/miss, only recorded with Pro scoring.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub putt_sequence: Vec<bool>,
    /// Whether the first ("cold") putt dropped.
    #[serde(default, deserialize_with = "lenient::bool_or_false")]
    pub first_putt_made: bool,
}

impl Round {
    /// A round scored by made count only.
    pub fn simple(id: i64, distance: u32, made: u32) -> Result<Self> {
        validate_made(made)?;
        Ok(Self {
            id,
            distance,
            made,
            attempts: ATTEMPTS_PER_ROUND,
            putt_sequence: Vec::new(),
            first_putt_made: false,
        })
    }

    /// A round scored putt by putt.
    pub fn pro(id: i64, distance: u32, sequence: [bool; ATTEMPTS_PER_ROUND as usize]) -> Self {
        Self {
            id,
            distance,
            made: sequence.iter().filter(|made| **made).count() as u32,
            attempts: ATTEMPTS_PER_ROUND,
            putt_sequence: sequence.to_vec(),
            first_putt_made: sequence[0],
        }
    }

    /// Every putt dropped.
    pub fn is_perfect(&self) -> bool {
        self.attempts > 0 && self.made == self.attempts
    }

    /// Rounds carrying a full five-putt sequence feed the Pro statistics.
    pub fn has_full_sequence(&self) -> bool {
        self.putt_sequence.len() == ATTEMPTS_PER_ROUND as usize
    }
}

pub(crate) fn validate_made(made: u32) -> Result<()> {
    if made > ATTEMPTS_PER_ROUND {
        return Err(DialedError::validation(format!(
            "made count {} exceeds {} attempts",
            made, ATTEMPTS_PER_ROUND
        )));
    }
    Ok(())
}
