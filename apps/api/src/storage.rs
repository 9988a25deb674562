//! Document storage — the sink finished PDFs are persisted to.
//!
//! The store is a pluggable trait object so the request layer never knows
//! where documents live. The local implementation writes through a
//! temporary file in the destination directory and renames into place, so
//! a crash mid-write never leaves a partial document visible.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use bytes::Bytes;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persists a finished document under `filename` atomically.
    async fn put(&self, filename: &str, bytes: Bytes) -> Result<()>;

    /// Loads a stored document. `None` when it does not exist.
    async fn get(&self, filename: &str) -> Result<Option<Bytes>>;
}

/// Filesystem-backed store rooted at a single output directory.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create output directory {}", root.display()))?;
        Ok(Self { root })
    }

    fn path_for(&self, filename: &str) -> Result<PathBuf> {
        // Filenames are generated internally, but never trust them as paths.
        if filename.is_empty() || filename.contains(['/', '\\']) || filename.contains("..") {
            bail!("Invalid document filename: {filename:?}");
        }
        Ok(self.root.join(filename))
    }
}

#[async_trait]
impl DocumentStore for LocalStore {
    async fn put(&self, filename: &str, bytes: Bytes) -> Result<()> {
        let path = self.path_for(filename)?;
        let root = self.root.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            // The temp file lives in the destination directory so the final
            // rename stays on one filesystem.
            let mut tmp = tempfile::NamedTempFile::new_in(&root)
                .context("Failed to create temporary file")?;
            tmp.write_all(&bytes)
                .context("Failed to write document bytes")?;
            tmp.persist(&path)
                .with_context(|| format!("Failed to persist document to {}", path.display()))?;
            Ok(())
        })
        .await
        .context("Storage task panicked")?
    }

    async fn get(&self, filename: &str) -> Result<Option<Bytes>> {
        let path = self.path_for(filename)?;
        tokio::task::spawn_blocking(move || match std::fs::read(&path) {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        })
        .await
        .context("Storage task panicked")?
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path()).unwrap();
        store
            .put("resume_test.pdf", Bytes::from_static(b"%PDF-1.7 data"))
            .await
            .unwrap();
        let loaded = store.get("resume_test.pdf").await.unwrap().unwrap();
        assert_eq!(&loaded[..], b"%PDF-1.7 data");
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path()).unwrap();
        assert!(store.get("absent.pdf").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path()).unwrap();
        store
            .put("doc.pdf", Bytes::from_static(b"data"))
            .await
            .unwrap();
        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["doc.pdf"]);
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path()).unwrap();
        assert!(store
            .put("../escape.pdf", Bytes::from_static(b"x"))
            .await
            .is_err());
        assert!(store.get("a/b.pdf").await.is_err());
    }

    #[tokio::test]
    async fn test_put_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path()).unwrap();
        store.put("doc.pdf", Bytes::from_static(b"old")).await.unwrap();
        store.put("doc.pdf", Bytes::from_static(b"new")).await.unwrap();
        let loaded = store.get("doc.pdf").await.unwrap().unwrap();
        assert_eq!(&loaded[..], b"new");
    }
}
