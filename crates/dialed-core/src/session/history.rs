//! The session history.
//!
//! An ordered list of sessions, newest date first. Every mutation produces
//! the full list again; the persistence layer writes it back wholesale.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;
use tracing::warn;

use super::merge::{is_mergeable_pair, merge_sessions};
use super::model::Session;
use crate::date::SessionDate;
use crate::error::{DialedError, Result};

/// Dashboard activity filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HistoryFilter {
    #[default]
    All,
    /// Standard practice only (World sessions excluded).
    Practice,
    World,
    League,
}

impl HistoryFilter {
    pub fn matches(&self, session: &Session) -> bool {
        match self {
            HistoryFilter::All => true,
            HistoryFilter::Practice => session.is_practice() && !session.is_world(),
            HistoryFilter::World => session.is_world(),
            HistoryFilter::League => session.is_league(),
        }
    }
}

impl FromStr for HistoryFilter {
    type Err = DialedError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "practice" => Ok(Self::Practice),
            "world" => Ok(Self::World),
            "league" => Ok(Self::League),
            other => Err(DialedError::validation(format!("unknown filter '{}'", other))),
        }
    }
}

/// Ordered session history, sorted descending by date.
///
/// Sessions sharing a date keep their relative order (newest insert first);
/// ids are not used as a tie-break.
///
/// Deserializing skips records that are not valid sessions, so one bad entry
/// never hides the rest of the history. A null history reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<Session>")]
pub struct History(Vec<Session>);

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a list, restoring date order.
    pub fn from_sessions(sessions: Vec<Session>) -> Self {
        let mut history = Self(sessions);
        history.sort();
        history
    }

    fn sort(&mut self) {
        // Stable: same-date sessions keep their incoming order.
        self.0.sort_by(|a, b| b.date.cmp(&a.date));
    }

    pub fn sessions(&self) -> &[Session] {
        &self.0
    }

    pub fn into_sessions(self) -> Vec<Session> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Session> {
        self.0.iter()
    }

    pub fn find(&self, id: i64) -> Option<&Session> {
        self.0.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.find(id).is_some()
    }

    /// Practice sessions, World included.
    pub fn practice(&self) -> impl Iterator<Item = &Session> {
        self.0.iter().filter(|s| s.is_practice())
    }

    pub fn league(&self) -> impl Iterator<Item = &Session> {
        self.0.iter().filter(|s| s.is_league())
    }

    pub fn filtered(&self, filter: HistoryFilter) -> impl Iterator<Item = &Session> {
        self.0.iter().filter(move |s| filter.matches(s))
    }

    /// Distinct practice dates, most recent first.
    pub fn practice_dates(&self) -> Vec<SessionDate> {
        let mut dates: Vec<SessionDate> = self.practice().map(|s| s.date).collect();
        dates.sort_by(|a, b| b.cmp(a));
        dates.dedup();
        dates
    }

    /// Adds a finished session at the front of its date.
    pub fn append(&mut self, session: Session) -> Result<()> {
        if self.contains(session.id) {
            return Err(DialedError::validation(format!(
                "session {} already exists",
                session.id
            )));
        }
        self.0.insert(0, session);
        self.sort();
        Ok(())
    }

    /// Removes a session by id.
    pub fn delete(&mut self, id: i64) -> Result<Session> {
        let index = self
            .0
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| DialedError::not_found("session", id.to_string()))?;
        Ok(self.0.remove(index))
    }

    /// Drops every session.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// A same-day standard practice session that `candidate` could be merged into.
    pub fn find_duplicate(&self, candidate: &Session) -> Option<&Session> {
        self.0.iter().find(|s| is_mergeable_pair(s, candidate))
    }

    /// Folds a session that is not stored yet into `existing_id`.
    pub fn merge_into(&mut self, existing_id: i64, incoming: &Session) -> Result<&Session> {
        if self.contains(incoming.id) {
            return Err(DialedError::validation(format!(
                "session {} already exists",
                incoming.id
            )));
        }
        let slot = self
            .0
            .iter_mut()
            .find(|s| s.id == existing_id)
            .ok_or_else(|| DialedError::not_found("session", existing_id.to_string()))?;
        *slot = merge_sessions(slot, incoming)?;
        Ok(&*slot)
    }

    /// Replaces `existing_id` with the merge of both sessions and removes `incoming_id`.
    pub fn merge(&mut self, existing_id: i64, incoming_id: i64) -> Result<&Session> {
        let existing = self
            .find(existing_id)
            .ok_or_else(|| DialedError::not_found("session", existing_id.to_string()))?;
        let incoming = self
            .find(incoming_id)
            .ok_or_else(|| DialedError::not_found("session", incoming_id.to_string()))?;

        let merged = merge_sessions(existing, incoming)?;

        self.0.retain(|s| s.id != incoming_id);
        let slot = self
            .0
            .iter_mut()
            .find(|s| s.id == existing_id)
            .ok_or_else(|| DialedError::internal("merged session vanished from history"))?;
        *slot = merged;
        Ok(&*slot)
    }
}

impl<'de> Deserialize<'de> for History {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let records = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
        let total = records.len();
        let sessions: Vec<Session> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| {
                let id = record.get("id").cloned();
                match serde_json::from_value::<Session>(record) {
                    Ok(session) => Some(session),
                    Err(e) => {
                        warn!(index, ?id, error = %e, "Skipping unreadable session record");
                        None
                    }
                }
            })
            .collect();
        if sessions.len() < total {
            warn!(kept = sessions.len(), total, "History loaded with skipped records");
        }
        Ok(Self::from_sessions(sessions))
    }
}

impl From<Vec<Session>> for History {
    fn from(sessions: Vec<Session>) -> Self {
        Self::from_sessions(sessions)
    }
}

impl From<History> for Vec<Session> {
    fn from(history: History) -> Self {
        history.0
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Session;
    type IntoIter = std::slice::Iter<'a, Session>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
