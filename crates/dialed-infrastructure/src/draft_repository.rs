//! Unfinished-session buffer on disk.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use dialed_core::error::{DialedError, Result};
use dialed_core::session::Round;
use dialed_core::user::DraftRepository;

use crate::paths::DialedPaths;
use crate::storage::AtomicJsonFile;

/// Keeps the rounds of the session in progress in `current_draft.json`, so a
/// crash or a closed terminal does not lose them.
pub struct FileDraftRepository {
    path: PathBuf,
}

impl FileDraftRepository {
    pub fn new(data_dir: &Path) -> Self {
        Self::with_path(DialedPaths::draft_file(data_dir))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn file(&self) -> AtomicJsonFile<Vec<Round>> {
        AtomicJsonFile::new(self.path.clone())
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(AtomicJsonFile<Vec<Round>>) -> anyhow::Result<T> + Send + 'static,
    {
        let file = self.file();
        let result = tokio::task::spawn_blocking(move || f(file))
            .await
            .map_err(|e| DialedError::internal(format!("Failed to join task: {}", e)))?;
        result.map_err(|e| DialedError::data_access(format!("{:#}", e)))
    }
}

#[async_trait]
impl DraftRepository for FileDraftRepository {
    async fn load(&self) -> Result<Vec<Round>> {
        let rounds = self
            .blocking(|file| file.load())
            .await?
            .unwrap_or_default();
        Ok(rounds)
    }

    async fn save(&self, rounds: &[Round]) -> Result<()> {
        let rounds = rounds.to_vec();
        self.blocking(move |file| file.save(&rounds)).await
    }

    async fn clear(&self) -> Result<()> {
        self.blocking(|file| file.remove()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_draft_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileDraftRepository::new(temp_dir.path());
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileDraftRepository::new(temp_dir.path());
        let rounds = vec![
            Round::simple(2, 25, 3).unwrap(),
            Round::simple(1, 20, 5).unwrap(),
        ];

        repo.save(&rounds).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), rounds);

        repo.clear().await.unwrap();
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_draft_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("draft.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = FileDraftRepository::with_path(path).load().await.unwrap_err();
        assert!(matches!(err, DialedError::DataAccess(_)));
    }
}
