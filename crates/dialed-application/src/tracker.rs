//! The practice tracker controller.
//!
//! Every mutation follows the same path: build the next [`AppState`] with the
//! reducer, swap it in, then push the changed top-level fields to the
//! document store. Store writes never fail a use case; a failed write is
//! logged and the local state is kept as is.

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock, watch};

use dialed_core::config::DialedConfig;
use dialed_core::error::{DialedError, Result};
use dialed_core::scoring::{LeagueScorecard, PracticeDraft, ScoringStyle};
use dialed_core::session::{HistoryFilter, Round, Session};
use dialed_core::state::{AppEvent, AppState, StatsSnapshot};
use dialed_core::user::{
    AuthProvider, AuthUser, DocumentPatch, DocumentStore, DraftRepository, UserDocument,
    UserRole, UserSettings,
};
use dialed_core::world::WorldGame;
use dialed_infrastructure::{
    DialedPaths, FileDocumentStore, FileDraftRepository, LocalAuthProvider,
};

use crate::clock::{Clock, SystemClock};

/// What to do when a finished session lands on a day that already has a
/// standard practice session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Stop and report the duplicate.
    #[default]
    Ask,
    Merge,
    KeepSeparate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(Session),
    /// The session was folded into a same-day one; holds the merged result.
    Merged(Session),
    /// Nothing was saved; call again with `Merge` or `KeepSeparate`.
    DuplicateFound { existing: Session, incoming: Session },
}

type Snapshots = watch::Receiver<Option<UserDocument>>;

pub struct PracticeTracker {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn DocumentStore>,
    drafts: Arc<dyn DraftRepository>,
    clock: Arc<dyn Clock>,
    state: RwLock<AppState>,
    snapshots: Mutex<Option<Snapshots>>,
}

impl PracticeTracker {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn DocumentStore>,
        drafts: Arc<dyn DraftRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            auth,
            store,
            drafts,
            clock,
            state: RwLock::new(AppState::default()),
            snapshots: Mutex::new(None),
        }
    }

    /// Wires the file-backed collaborators described by `config`.
    pub fn from_config(config: &DialedConfig) -> Result<Self> {
        let data_dir = DialedPaths::data_dir(config)?;
        tracing::info!(data_dir = %data_dir.display(), "opening local storage");
        Ok(Self::new(
            Arc::new(LocalAuthProvider::new(config.user.clone())),
            Arc::new(FileDocumentStore::new(&data_dir)?),
            Arc::new(FileDraftRepository::new(&data_dir)),
            Arc::new(SystemClock::new()),
        ))
    }

    // ============================================================================
    // State plumbing
    // ============================================================================

    async fn dispatch(&self, event: AppEvent) -> Result<AppState> {
        let mut state = self.state.write().await;
        let next = state.clone().apply(event)?;
        *state = next.clone();
        Ok(next)
    }

    /// Replaces local state with the newest store snapshot, if one arrived.
    pub async fn sync(&self) -> Result<()> {
        let snapshot = {
            let mut guard = self.snapshots.lock().await;
            let Some(rx) = guard.as_mut() else {
                return Ok(());
            };
            match rx.has_changed() {
                Ok(true) => rx.borrow_and_update().clone(),
                _ => return Ok(()),
            }
        };
        self.dispatch(AppEvent::DocumentReceived(snapshot)).await?;
        Ok(())
    }

    async fn signed_in_user(&self) -> Result<AuthUser> {
        self.sync().await?;
        self.state
            .read()
            .await
            .user
            .clone()
            .ok_or_else(|| DialedError::auth("not signed in"))
    }

    /// Pushes `patch` for the signed-in user; failures are only logged.
    async fn persist(&self, uid: &str, patch: DocumentPatch) {
        match self.store.merge(uid, patch).await {
            Ok(document) => {
                tracing::debug!(uid, sessions = document.history.len(), "document saved");
            }
            Err(e) => {
                tracing::warn!(uid, error = %e, "failed to save user document; keeping local state");
            }
        }
    }

    async fn persist_history(&self, uid: &str, state: &AppState) {
        self.persist(uid, DocumentPatch::history(state.document.history.clone()))
            .await;
    }

    pub async fn state(&self) -> AppState {
        self.state.read().await.clone()
    }

    pub fn today(&self) -> dialed_core::date::SessionDate {
        self.clock.today()
    }

    /// Fresh id for a round being logged.
    pub fn next_id(&self) -> i64 {
        self.clock.now_millis()
    }

    // ============================================================================
    // Identity
    // ============================================================================

    pub async fn sign_in(&self) -> Result<AuthUser> {
        let user = self.auth.sign_in().await?;
        self.dispatch(AppEvent::SignedIn(user.clone())).await?;

        let mut rx = self.store.subscribe(&user.uid).await?;
        let document = rx.borrow_and_update().clone();
        *self.snapshots.lock().await = Some(rx);
        let state = self.dispatch(AppEvent::DocumentReceived(document)).await?;

        tracing::info!(
            uid = %user.uid,
            sessions = state.history().len(),
            "user document loaded"
        );
        Ok(user)
    }

    pub async fn sign_out(&self) -> Result<()> {
        self.auth.sign_out().await?;
        *self.snapshots.lock().await = None;
        self.dispatch(AppEvent::SignedOut).await?;
        Ok(())
    }

    // ============================================================================
    // Sessions
    // ============================================================================

    /// Appends a finished session to the history.
    ///
    /// A standard practice session dated like an existing one is checked
    /// against `policy` first.
    pub async fn save_session(&self, session: Session, policy: MergePolicy) -> Result<SaveOutcome> {
        let user = self.signed_in_user().await?;

        // Lookup and write share one lock so a concurrent save cannot slip in
        // between them.
        let (state, outcome) = {
            let mut current = self.state.write().await;
            let duplicate = current.history().find_duplicate(&session).cloned();
            let (event, merged_into) = match (duplicate, policy) {
                (Some(existing), MergePolicy::Ask) => {
                    tracing::info!(existing = existing.id, date = %session.date, "same-day session found");
                    return Ok(SaveOutcome::DuplicateFound {
                        existing,
                        incoming: session,
                    });
                }
                (Some(existing), MergePolicy::Merge) => (
                    AppEvent::SessionMergedInto {
                        existing_id: existing.id,
                        incoming: session.clone(),
                    },
                    Some(existing.id),
                ),
                _ => (AppEvent::SessionAdded(session.clone()), None),
            };

            let next = current.clone().apply(event)?;
            *current = next.clone();
            let outcome = match merged_into {
                Some(existing_id) => SaveOutcome::Merged(
                    next.history()
                        .find(existing_id)
                        .cloned()
                        .ok_or_else(|| DialedError::internal("merged session missing from history"))?,
                ),
                None => SaveOutcome::Saved(session),
            };
            (next, outcome)
        };

        tracing::info!(uid = %user.uid, sessions = state.history().len(), "session saved");
        self.persist_history(&user.uid, &state).await;
        Ok(outcome)
    }

    /// Saves a Standard draft and clears the stored buffer.
    ///
    /// Returns `None` for an empty draft.
    pub async fn finish_practice(
        &self,
        draft: PracticeDraft,
        policy: MergePolicy,
    ) -> Result<Option<SaveOutcome>> {
        let Some(session) = draft.finish(self.clock.now_millis(), self.clock.today()) else {
            return Ok(None);
        };
        let outcome = self.save_session(session, policy).await?;
        if !matches!(outcome, SaveOutcome::DuplicateFound { .. }) {
            self.discard_draft().await;
        }
        Ok(Some(outcome))
    }

    /// Saves a World game. Returns `None` when no station was played.
    pub async fn finish_world(&self, game: WorldGame) -> Result<Option<SaveOutcome>> {
        let Some(session) = game.finish(self.clock.now_millis(), self.clock.today()) else {
            return Ok(None);
        };
        self.save_session(session, MergePolicy::KeepSeparate)
            .await
            .map(Some)
    }

    pub async fn finish_league(&self, card: LeagueScorecard) -> Result<SaveOutcome> {
        let session = card.finish(self.clock.now_millis(), self.clock.today());
        self.save_session(session, MergePolicy::KeepSeparate).await
    }

    pub async fn delete_session(&self, id: i64) -> Result<()> {
        let user = self.signed_in_user().await?;
        let state = self.dispatch(AppEvent::SessionDeleted(id)).await?;
        tracing::info!(uid = %user.uid, id, "session deleted");
        self.persist_history(&user.uid, &state).await;
        Ok(())
    }

    pub async fn merge_sessions(&self, existing_id: i64, incoming_id: i64) -> Result<Session> {
        let user = self.signed_in_user().await?;
        let state = self
            .dispatch(AppEvent::SessionsMerged {
                existing_id,
                incoming_id,
            })
            .await?;
        let merged = state
            .history()
            .find(existing_id)
            .cloned()
            .ok_or_else(|| DialedError::internal("merged session missing from history"))?;
        tracing::info!(uid = %user.uid, existing_id, incoming_id, "sessions merged");
        self.persist_history(&user.uid, &state).await;
        Ok(merged)
    }

    /// Drops the whole history. There is no undo.
    pub async fn clear_history(&self) -> Result<()> {
        let user = self.signed_in_user().await?;
        let state = self.dispatch(AppEvent::HistoryCleared).await?;
        tracing::info!(uid = %user.uid, "history cleared");
        self.persist_history(&user.uid, &state).await;
        Ok(())
    }

    // ============================================================================
    // Drafts
    // ============================================================================

    /// Resumes the stored buffer, if any, with the user's scoring style.
    pub async fn resume_draft(&self) -> Result<PracticeDraft> {
        let style = self.state.read().await.document.settings.scoring_style;
        let rounds = self.drafts.load().await?;
        if !rounds.is_empty() {
            tracing::info!(rounds = rounds.len(), "resuming unfinished session");
        }
        Ok(PracticeDraft::resume(style, rounds))
    }

    pub async fn store_draft(&self, rounds: &[Round]) {
        if let Err(e) = self.drafts.save(rounds).await {
            tracing::warn!(error = %e, "failed to store draft");
        }
    }

    /// Abandons the unfinished session.
    pub async fn discard_draft(&self) {
        if let Err(e) = self.drafts.clear().await {
            tracing::warn!(error = %e, "failed to clear draft");
        }
    }

    // ============================================================================
    // Settings, role, release notes
    // ============================================================================

    pub async fn update_settings(&self, settings: UserSettings) -> Result<()> {
        let user = self.signed_in_user().await?;
        self.dispatch(AppEvent::SettingsChanged(settings)).await?;
        self.persist(&user.uid, DocumentPatch::settings(settings)).await;
        Ok(())
    }

    pub async fn set_scoring_style(&self, style: ScoringStyle) -> Result<()> {
        let mut settings = self.state.read().await.document.settings;
        settings.scoring_style = style;
        self.update_settings(settings).await
    }

    pub async fn set_role(&self, role: UserRole) -> Result<()> {
        let user = self.signed_in_user().await?;
        self.dispatch(AppEvent::RoleChanged(role)).await?;
        self.persist(&user.uid, DocumentPatch::role(role)).await;
        Ok(())
    }

    pub async fn has_unseen_release(&self, current: &semver::Version) -> bool {
        self.state.read().await.document.has_unseen_release(current)
    }

    pub async fn acknowledge_release(&self, current: &semver::Version) -> Result<()> {
        let user = self.signed_in_user().await?;
        let patch = self.state.read().await.document.acknowledge_release(current);
        self.dispatch(AppEvent::ReleaseAcknowledged(current.clone()))
            .await?;
        self.persist(&user.uid, patch).await;
        Ok(())
    }

    // ============================================================================
    // Views
    // ============================================================================

    pub async fn set_filter(&self, filter: HistoryFilter) -> Result<()> {
        self.dispatch(AppEvent::FilterChanged(filter)).await?;
        Ok(())
    }

    /// Sessions under the active filter, newest first.
    pub async fn visible_sessions(&self) -> Vec<Session> {
        self.state
            .read()
            .await
            .visible_sessions()
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn stats(&self) -> StatsSnapshot {
        self.state.read().await.stats(self.clock.today())
    }
}
