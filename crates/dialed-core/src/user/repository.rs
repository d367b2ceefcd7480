//! Collaborator traits for identity and persistence.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::model::{DocumentPatch, UserDocument};
use crate::error::Result;
use crate::session::Round;

/// Identity handed out by an [`AuthProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub uid: String,
    pub display_name: String,
}

/// Signs users in and out.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Signs in and returns the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns `DialedError::Auth` when no identity is available.
    async fn sign_in(&self) -> Result<AuthUser>;

    async fn sign_out(&self) -> Result<()>;
}

/// Per-user document storage.
///
/// There is no compare-and-swap: callers rebuild the fields they change and
/// push them with [`merge`](Self::merge). Concurrent writers overwrite each
/// other, and the last write wins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads the current document, `None` if the user has never written one.
    async fn load(&self, uid: &str) -> Result<Option<UserDocument>>;

    /// Subscribes to document snapshots.
    ///
    /// The receiver starts with the current document and sees every later
    /// write made through this store.
    async fn subscribe(&self, uid: &str) -> Result<watch::Receiver<Option<UserDocument>>>;

    /// Upserts the present top-level fields of `patch`.
    ///
    /// # Returns
    ///
    /// The document as stored after the merge.
    async fn merge(&self, uid: &str, patch: DocumentPatch) -> Result<UserDocument>;
}

/// Local buffer of rounds logged in a session that has not been finished.
#[async_trait]
pub trait DraftRepository: Send + Sync {
    /// Rounds of the unfinished session, newest first; empty when none.
    async fn load(&self) -> Result<Vec<Round>>;

    async fn save(&self, rounds: &[Round]) -> Result<()>;

    async fn clear(&self) -> Result<()>;
}
