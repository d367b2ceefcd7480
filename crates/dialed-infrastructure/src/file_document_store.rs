//! File-backed user document store.
//!
//! Each user gets one versioned JSON file, `{users_dir}/{uid}.json`, migrated
//! to the latest schema on read. Writes are serialized with a tokio mutex
//! inside the process and an `fs2` lock across processes, but patches are
//! still applied blindly: the last write wins.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use version_migrate::Migrator;

use dialed_core::error::{DialedError, Result};
use dialed_core::user::{DocumentPatch, DocumentStore, UserDocument};

use crate::dto::{USER_DOCUMENT_ENTITY, create_user_document_migrator};
use crate::paths::DialedPaths;
use crate::snapshot_hub::SnapshotHub;
use crate::storage::AtomicFile;

pub struct FileDocumentStore {
    users_dir: PathBuf,
    migrator: Arc<Migrator>,
    write_lock: Mutex<()>,
    hub: SnapshotHub,
}

impl FileDocumentStore {
    /// Stores documents under `{data_dir}/users`.
    pub fn new(data_dir: &Path) -> Result<Self> {
        Ok(Self {
            users_dir: DialedPaths::users_dir(data_dir),
            migrator: Arc::new(create_user_document_migrator()?),
            write_lock: Mutex::new(()),
            hub: SnapshotHub::default(),
        })
    }

    fn document_file(&self, uid: &str) -> Result<AtomicFile> {
        let valid = !uid.is_empty()
            && uid
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(DialedError::validation(format!("invalid user id '{}'", uid)));
        }
        Ok(AtomicFile::new(self.users_dir.join(format!("{}.json", uid))))
    }
}

/// Reads and migrates a stored document, `None` when there is no file.
fn read_document(file: &AtomicFile, migrator: &Migrator) -> Result<Option<UserDocument>> {
    let Some(content) = file.read()? else {
        return Ok(None);
    };
    let value: serde_json::Value = serde_json::from_str(&content)?;
    let document = migrator
        .load_flat_from(USER_DOCUMENT_ENTITY, value)
        .map_err(|e| {
            DialedError::migration(format!(
                "Failed to migrate {}: {}",
                file.path().display(),
                e
            ))
        })?;
    Ok(Some(document))
}

fn join_error(e: tokio::task::JoinError) -> DialedError {
    DialedError::internal(format!("Failed to join task: {}", e))
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn load(&self, uid: &str) -> Result<Option<UserDocument>> {
        let file = self.document_file(uid)?;
        let migrator = self.migrator.clone();
        tokio::task::spawn_blocking(move || read_document(&file, &migrator))
            .await
            .map_err(join_error)?
    }

    async fn subscribe(&self, uid: &str) -> Result<watch::Receiver<Option<UserDocument>>> {
        let current = self.load(uid).await?;
        Ok(self.hub.subscribe(uid, current).await)
    }

    async fn merge(&self, uid: &str, patch: DocumentPatch) -> Result<UserDocument> {
        let file = self.document_file(uid)?;
        let migrator = self.migrator.clone();

        let _guard = self.write_lock.lock().await;
        let document = tokio::task::spawn_blocking(move || {
            let _lock = file.lock()?;
            let mut document = read_document(&file, &migrator)?.unwrap_or_default();
            patch.apply_to(&mut document);
            let serialized = migrator.save_domain_flat(USER_DOCUMENT_ENTITY, document.clone())?;
            file.write(&serialized)?;
            Ok::<_, DialedError>(document)
        })
        .await
        .map_err(join_error)??;

        tracing::debug!(uid, sessions = document.history.len(), "merged user document");
        self.hub.publish(uid, &document).await;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialed_core::date::SessionDate;
    use dialed_core::scoring::ScoringStyle;
    use dialed_core::session::{History, Round, Session};
    use dialed_core::user::{UserRole, UserSettings};
    use tempfile::TempDir;

    fn sample_history() -> History {
        History::from_sessions(vec![
            Session::practice(
                2,
                SessionDate::from_ymd(2024, 3, 6).unwrap(),
                None,
                vec![Round::pro(20, 25, [true, false, true, true, true])],
            ),
            Session::legacy_league(1, SessionDate::from_ymd(2024, 3, 1).unwrap(), 140),
        ])
    }

    #[tokio::test]
    async fn test_unknown_user_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileDocumentStore::new(temp_dir.path()).unwrap();
        assert!(store.load("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_then_reload() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileDocumentStore::new(temp_dir.path()).unwrap();
        store
            .merge("u1", DocumentPatch::history(sample_history()))
            .await
            .unwrap();

        let reopened = FileDocumentStore::new(temp_dir.path()).unwrap();
        let document = reopened.load("u1").await.unwrap().unwrap();
        assert_eq!(document.history, sample_history());
    }

    #[tokio::test]
    async fn test_settings_patch_keeps_history() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileDocumentStore::new(temp_dir.path()).unwrap();
        store
            .merge("u1", DocumentPatch::history(sample_history()))
            .await
            .unwrap();

        let settings = UserSettings {
            scoring_style: ScoringStyle::Pro,
            ..UserSettings::default()
        };
        let document = store
            .merge("u1", DocumentPatch::settings(settings))
            .await
            .unwrap();
        assert_eq!(document.history.len(), 2);
        assert_eq!(document.settings.scoring_style, ScoringStyle::Pro);
    }

    #[tokio::test]
    async fn test_v1_file_is_migrated() {
        let temp_dir = TempDir::new().unwrap();
        let users = temp_dir.path().join("users");
        std::fs::create_dir_all(&users).unwrap();
        std::fs::write(
            users.join("legacy.json"),
            r#"{"version": "1.0.0", "history": [
                {"id": 5, "date": "1/2/2024", "type": "LEAGUE", "isLegacy": true, "totalScore": "118"}
            ]}"#,
        )
        .unwrap();

        let store = FileDocumentStore::new(temp_dir.path()).unwrap();
        let document = store.load("legacy").await.unwrap().unwrap();
        assert_eq!(document.history.sessions()[0].league_total(), 118);
        assert_eq!(document.settings, UserSettings::default());
    }

    #[tokio::test]
    async fn test_bad_record_does_not_lock_out_user() {
        let temp_dir = TempDir::new().unwrap();
        let users = temp_dir.path().join("users");
        std::fs::create_dir_all(&users).unwrap();
        std::fs::write(
            users.join("u1.json"),
            r#"{"version": "1.0.0", "history": [
                {"id": 1, "date": "13/45/2024", "type": "PRACTICE"},
                {"id": 2, "type": "PRACTICE"},
                {"id": 3, "date": "1/2/2024"},
                {"id": 4, "date": "1/2/2024", "type": "LEAGUE", "details": {"1": {"1": null, "2": 5}}},
                {"id": 5, "date": "1/3/2024", "type": "PRACTICE", "summary": {"made": 3, "attempts": 5}}
            ]}"#,
        )
        .unwrap();

        let store = FileDocumentStore::new(temp_dir.path()).unwrap();
        let document = store.load("u1").await.unwrap().unwrap();
        let ids: Vec<i64> = document.history.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![5, 4]);
        assert_eq!(document.history.find(4).unwrap().league_total(), 10);

        // Writing back keeps the readable sessions.
        let document = store
            .merge("u1", DocumentPatch::role(UserRole::Practice))
            .await
            .unwrap();
        assert_eq!(document.history.len(), 2);
    }

    #[tokio::test]
    async fn test_subscribers_see_writes() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileDocumentStore::new(temp_dir.path()).unwrap();
        let mut rx = store.subscribe("u1").await.unwrap();
        assert!(rx.borrow().is_none());

        store
            .merge("u1", DocumentPatch::role(UserRole::Coach))
            .await
            .unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().and_then(|d| d.role), Some(UserRole::Coach));
    }

    #[tokio::test]
    async fn test_rejects_path_like_uid() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileDocumentStore::new(temp_dir.path()).unwrap();
        let err = store.load("../etc").await.unwrap_err();
        assert!(err.is_validation());
    }
}
