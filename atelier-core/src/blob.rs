//! Blob storage for uploaded image bytes.
//!
//! The service only ever sees public paths; where the bytes live is the
//! store's business. Deletion is tolerant of already-missing blobs so that
//! best-effort cleanup at the call sites stays simple.

use std::{
    collections::HashMap,
    fmt,
    path::{Component, Path, PathBuf},
    sync::{
        Mutex,
        atomic::{AtomicU64, Ordering},
    },
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;

use crate::error::{GalleryError, Result};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist `bytes` under a name derived from `original_name` and return
    /// the public path the blob is retrievable at.
    async fn store(&self, bytes: &[u8], original_name: &str) -> Result<String>;

    /// Remove a previously stored blob. Deleting a path that no longer
    /// exists is not an error.
    async fn delete(&self, path: &str) -> Result<()>;
}

/// Filesystem-backed store serving blobs from a static upload directory.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
    public_prefix: String,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        let public_prefix = public_prefix.into();
        Self {
            root: root.into(),
            public_prefix: public_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Collision-resistant blob name: sanitized original stem + millisecond
    /// UTC timestamp + original extension.
    fn blob_file_name(original_name: &str, now: DateTime<Utc>) -> String {
        let original = Path::new(original_name);

        let mut stem: String = original
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .take(40)
            .collect();
        if stem.is_empty() {
            stem.push_str("upload");
        }

        let extension = original
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin")
            .to_ascii_lowercase();

        format!("{stem}{}.{extension}", now.format("%y%m%d%H%M%S%3f"))
    }

    /// Map a public path back to a location inside the upload root,
    /// rejecting anything that would escape it.
    fn disk_path(&self, public_path: &str) -> Result<PathBuf> {
        let relative = public_path
            .strip_prefix(&self.public_prefix)
            .map(|rest| rest.trim_start_matches('/'))
            .filter(|rest| !rest.is_empty())
            .ok_or_else(|| {
                GalleryError::internal(format!("blob path outside store: {public_path}"))
            })?;

        let relative = Path::new(relative);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(GalleryError::internal(format!(
                "blob path outside store: {public_path}"
            )));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn store(&self, bytes: &[u8], original_name: &str) -> Result<String> {
        let file_name = Self::blob_file_name(original_name, Utc::now());
        tokio::fs::write(self.root.join(&file_name), bytes).await?;
        Ok(format!("{}/{}", self.public_prefix, file_name))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let disk = self.disk_path(path)?;
        match tokio::fs::remove_file(disk).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory store for tests and database-less development runs.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    counter: AtomicU64,
}

impl MemoryBlobStore {
    pub fn contains(&self, path: &str) -> bool {
        self.blobs.lock().expect("blob lock poisoned").contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().expect("blob lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for MemoryBlobStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBlobStore")
            .field("len", &self.len())
            .finish()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn store(&self, bytes: &[u8], original_name: &str) -> Result<String> {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        let path = format!("/blobs/{n}-{original_name}");
        self.blobs
            .lock()
            .expect("blob lock poisoned")
            .insert(path.clone(), bytes.to_vec());
        Ok(path)
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.blobs.lock().expect("blob lock poisoned").remove(path);
        Ok(())
    }
}
