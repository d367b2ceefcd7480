//! Atomic file operations.
//!
//! Writes go to a temporary sibling that is synced and renamed over the
//! target, so readers never see a half-written file. Read-modify-write
//! sequences hold an exclusive `fs2` lock on a `.lock` sibling.

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// A text file replaced atomically on every write.
#[derive(Debug, Clone)]
pub struct AtomicFile {
    path: PathBuf,
}

impl AtomicFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file, `None` when it is missing or blank.
    pub fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(content))
    }

    /// Replaces the file content via tmp file + rename.
    pub fn write(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)
            .with_context(|| format!("Failed to create {}", tmp_path.display()))?;
        tmp_file.write_all(content.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }

    /// Removes the file if present.
    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", self.path.display())),
        }
    }

    /// Blocks until this process holds the exclusive lock for the file.
    pub fn lock(&self) -> Result<FileLock> {
        FileLock::acquire(&self.path)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .context("Path has no parent directory")?;
        let file_name = self.path.file_name().context("Path has no file name")?;
        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

/// A JSON file holding one `T`.
#[derive(Debug, Clone)]
pub struct AtomicJsonFile<T> {
    file: AtomicFile,
    _phantom: PhantomData<T>,
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::new(path),
            _phantom: PhantomData,
        }
    }

    pub fn load(&self) -> Result<Option<T>> {
        let Some(content) = self.file.read()? else {
            return Ok(None);
        };
        let data = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.file.path().display()))?;
        Ok(Some(data))
    }

    pub fn save(&self, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        self.file.write(&json)
    }

    pub fn remove(&self) -> Result<()> {
        self.file.remove()
    }
}

/// Exclusive lock released when the handle is dropped.
///
/// The `.lock` file itself stays on disk: deleting it would let a waiter
/// holding the old inode and a newcomer creating a fresh one both proceed.
pub struct FileLock {
    #[allow(dead_code)]
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open {}", lock_path.display()))?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive().context("Failed to acquire lock")?;
        }

        Ok(FileLock { file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Counter>::new(temp_dir.path().join("nested/counter.json"));
        assert!(file.load().unwrap().is_none());

        let counter = Counter {
            name: "putts".to_string(),
            count: 5,
        };
        file.save(&counter).unwrap();
        assert_eq!(file.load().unwrap(), Some(counter));
    }

    #[test]
    fn test_lock_file_outlives_guard_and_is_reacquired() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.json");
        let file = AtomicFile::new(path.clone());

        {
            let _lock = file.lock().unwrap();
            file.write("one").unwrap();
        }
        assert!(path.with_extension("lock").exists());

        let _lock = file.lock().unwrap();
        file.write("two").unwrap();
        assert_eq!(file.read().unwrap().as_deref(), Some("two"));

        // only the target and its lock remain, no temp file
        let mut names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["doc.json", "doc.lock"]);
    }

    #[test]
    fn test_lock_serializes_threads() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::new(temp_dir.path().join("count.txt"));
        file.write("0").unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let file = file.clone();
                std::thread::spawn(move || {
                    for _ in 0..10 {
                        let _lock = file.lock().unwrap();
                        let n: u32 = file.read().unwrap().unwrap().parse().unwrap();
                        file.write(&(n + 1).to_string()).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(file.read().unwrap().as_deref(), Some("40"));
    }

    #[test]
    fn test_blank_file_reads_as_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blank.json");
        fs::write(&path, "  \n").unwrap();
        assert!(AtomicFile::new(path.clone()).read().unwrap().is_none());

        AtomicFile::new(path.clone()).remove().unwrap();
        assert!(!path.exists());
        // removing twice is fine
        AtomicFile::new(path).remove().unwrap();
    }
}
