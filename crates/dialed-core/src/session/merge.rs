//! Same-day practice merge.

use super::model::Session;
use crate::error::{DialedError, Result};

/// Whether two sessions are same-day standard practice twins.
pub fn is_mergeable_pair(existing: &Session, incoming: &Session) -> bool {
    existing.id != incoming.id
        && existing.date == incoming.date
        && existing.is_standard_practice()
        && incoming.is_standard_practice()
}

/// Combines two same-day standard practice sessions.
///
/// The result keeps `existing`'s identity, sums the summaries field-wise and
/// appends `incoming`'s rounds after `existing`'s. Removing `incoming` from the
/// history is the caller's job.
pub fn merge_sessions(existing: &Session, incoming: &Session) -> Result<Session> {
    if !is_mergeable_pair(existing, incoming) {
        return Err(DialedError::validation(format!(
            "sessions {} and {} are not same-day standard practice sessions",
            existing.id, incoming.id
        )));
    }

    let mut merged = existing.clone();
    merged.summary = Some(existing.summary().combine(incoming.summary()));
    merged.rounds.extend(incoming.rounds.iter().cloned());
    Ok(merged)
}
