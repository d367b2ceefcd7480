//! Application state and its reducer.
//!
//! The controller owns one [`AppState`] and moves it forward with
//! [`AppState::apply`]. Every event produces a new state; nothing else
//! mutates it.

use serde::Serialize;

use crate::date::SessionDate;
use crate::error::Result;
use crate::session::{History, HistoryFilter, Session};
use crate::stats::{
    LeagueTrends, PracticeTrends, ProStats, StreakStats, StreakSummary, WorldStats,
    compute_league_trends, compute_practice_trends, compute_pro_stats, compute_streak,
    compute_streak_stats, compute_world_stats, longest_streak,
};
use crate::user::{AuthUser, UserDocument, UserRole, UserSettings};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub user: Option<AuthUser>,
    pub document: UserDocument,
    /// Set once the first snapshot for the signed-in user arrived.
    pub is_data_loaded: bool,
    pub filter: HistoryFilter,
}

/// Everything that can change the application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    SignedIn(AuthUser),
    SignedOut,
    /// A snapshot from the document store; `None` for a brand-new user.
    DocumentReceived(Option<UserDocument>),
    SessionAdded(Session),
    SessionDeleted(i64),
    SessionsMerged { existing_id: i64, incoming_id: i64 },
    /// A finished session folded straight into a stored same-day session.
    SessionMergedInto { existing_id: i64, incoming: Session },
    HistoryCleared,
    SettingsChanged(UserSettings),
    RoleChanged(UserRole),
    ReleaseAcknowledged(semver::Version),
    FilterChanged(HistoryFilter),
}

impl AppState {
    /// Applies one event.
    ///
    /// History events fail without touching the state when they reference
    /// unknown sessions or break a history invariant.
    pub fn apply(self, event: AppEvent) -> Result<Self> {
        let mut next = self;
        match event {
            AppEvent::SignedIn(user) => {
                next.user = Some(user);
                next.document = UserDocument::default();
                next.is_data_loaded = false;
            }
            AppEvent::SignedOut => return Ok(Self::default()),
            AppEvent::DocumentReceived(document) => {
                next.document = document.unwrap_or_default();
                next.is_data_loaded = true;
            }
            AppEvent::SessionAdded(session) => next.document.history.append(session)?,
            AppEvent::SessionDeleted(id) => {
                next.document.history.delete(id)?;
            }
            AppEvent::SessionsMerged {
                existing_id,
                incoming_id,
            } => {
                next.document.history.merge(existing_id, incoming_id)?;
            }
            AppEvent::SessionMergedInto {
                existing_id,
                incoming,
            } => {
                next.document.history.merge_into(existing_id, &incoming)?;
            }
            AppEvent::HistoryCleared => next.document.history.clear(),
            AppEvent::SettingsChanged(settings) => next.document.settings = settings,
            AppEvent::RoleChanged(role) => next.document.role = Some(role),
            AppEvent::ReleaseAcknowledged(version) => {
                let patch = next.document.acknowledge_release(&version);
                patch.apply_to(&mut next.document);
            }
            AppEvent::FilterChanged(filter) => next.filter = filter,
        }
        Ok(next)
    }

    pub fn history(&self) -> &History {
        &self.document.history
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Sessions shown under the active filter.
    pub fn visible_sessions(&self) -> Vec<&Session> {
        self.document.history.filtered(self.filter).collect()
    }

    /// Every derived statistic for `today`.
    pub fn stats(&self, today: SessionDate) -> StatsSnapshot {
        StatsSnapshot::compute(self.history(), today)
    }
}

/// All dashboard statistics at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub streak: StreakSummary,
    pub streak_stats: StreakStats,
    pub longest_streak: u32,
    pub practice: Option<PracticeTrends>,
    pub league: Option<LeagueTrends>,
    pub world: Option<WorldStats>,
    pub pro: Option<ProStats>,
}

impl StatsSnapshot {
    pub fn compute(history: &History, today: SessionDate) -> Self {
        let streak = compute_streak(history, today);
        let streak_stats = compute_streak_stats(history, streak.streak, today);
        tracing::debug!(
            sessions = history.len(),
            streak = streak.streak,
            "computed stats snapshot"
        );
        Self {
            streak_stats,
            longest_streak: longest_streak(history),
            practice: compute_practice_trends(history),
            league: compute_league_trends(history),
            world: compute_world_stats(history),
            pro: compute_pro_stats(history),
            streak,
        }
    }
}
