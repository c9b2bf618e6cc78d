//! Blob storage for uploaded face images and detection snapshots.
//!
//! The core only needs a stable reference string per stored blob, so the
//! backend is a small trait with a local-filesystem implementation. Storage
//! keys embed a fresh UUID, which keeps concurrent uploads with identical
//! file names collision-free.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::errors::Error;

/// Trait for blob storage backends
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Store content under a category (e.g. "faces") and return the storage key
    async fn store(&self, category: &str, file_name: &str, content: &[u8]) -> Result<String, Error>;

    /// Retrieve content by storage key
    async fn retrieve(&self, storage_key: &str) -> Result<Vec<u8>, Error>;

    /// Delete content by storage key
    async fn delete(&self, storage_key: &str) -> Result<(), Error>;

    /// Check whether a storage key exists
    async fn exists(&self, storage_key: &str) -> Result<bool, Error>;
}

/// Local filesystem storage backend rooted at the configured uploads directory.
pub struct LocalFileStorage {
    base_path: PathBuf,
}

impl LocalFileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Keep storage keys shell- and URL-friendly regardless of what the
    /// client named the upload.
    fn sanitize_file_name(file_name: &str) -> String {
        let cleaned: String = file_name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
            .collect();

        if cleaned.is_empty() { "upload".to_string() } else { cleaned }
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(&self, category: &str, file_name: &str, content: &[u8]) -> Result<String, Error> {
        let storage_key = format!("{}/{}_{}", category, uuid::Uuid::new_v4(), Self::sanitize_file_name(file_name));

        let full_path = self.base_path.join(&storage_key);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| Error::Internal {
                operation: format!("create upload directory: {e}"),
            })?;
        }

        let mut file = fs::File::create(&full_path).await.map_err(|e| Error::Internal {
            operation: format!("create upload file: {e}"),
        })?;
        file.write_all(content).await.map_err(|e| Error::Internal {
            operation: format!("write upload file: {e}"),
        })?;
        file.sync_all().await.map_err(|e| Error::Internal {
            operation: format!("sync upload file: {e}"),
        })?;

        Ok(storage_key)
    }

    async fn retrieve(&self, storage_key: &str) -> Result<Vec<u8>, Error> {
        let full_path = self.base_path.join(storage_key);

        if !full_path.exists() {
            return Err(Error::NotFound {
                resource: "file",
                id: storage_key.to_string(),
            });
        }

        fs::read(&full_path).await.map_err(|e| Error::Internal {
            operation: format!("read stored file: {e}"),
        })
    }

    async fn delete(&self, storage_key: &str) -> Result<(), Error> {
        let full_path = self.base_path.join(storage_key);

        if full_path.exists() {
            fs::remove_file(&full_path).await.map_err(|e| Error::Internal {
                operation: format!("delete stored file: {e}"),
            })?;
        }

        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> Result<bool, Error> {
        Ok(self.base_path.join(storage_key).exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> (tempfile::TempDir, LocalFileStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().to_path_buf());
        (dir, storage)
    }

    #[test_log::test(tokio::test)]
    async fn test_store_and_retrieve() {
        let (_dir, storage) = storage();

        let key = storage.store("faces", "alice.jpg", b"jpeg bytes").await.unwrap();
        assert!(key.starts_with("faces/"));
        assert!(key.ends_with("alice.jpg"));

        assert!(storage.exists(&key).await.unwrap());
        let content = storage.retrieve(&key).await.unwrap();
        assert_eq!(content, b"jpeg bytes");
    }

    #[test_log::test(tokio::test)]
    async fn test_identical_names_get_distinct_keys() {
        let (_dir, storage) = storage();

        let key1 = storage.store("faces", "same.jpg", b"one").await.unwrap();
        let key2 = storage.store("faces", "same.jpg", b"two").await.unwrap();

        assert_ne!(key1, key2);
        assert_eq!(storage.retrieve(&key1).await.unwrap(), b"one");
        assert_eq!(storage.retrieve(&key2).await.unwrap(), b"two");
    }

    #[test_log::test(tokio::test)]
    async fn test_delete_is_idempotent() {
        let (_dir, storage) = storage();

        let key = storage.store("faces", "gone.jpg", b"bytes").await.unwrap();
        storage.delete(&key).await.unwrap();
        assert!(!storage.exists(&key).await.unwrap());

        // Second delete of a missing key is not an error
        storage.delete(&key).await.unwrap();
        assert!(storage.retrieve(&key).await.is_err());
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(LocalFileStorage::sanitize_file_name("alice.jpg"), "alice.jpg");
        assert_eq!(LocalFileStorage::sanitize_file_name("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(LocalFileStorage::sanitize_file_name("with space.png"), "with_space.png");
        assert_eq!(LocalFileStorage::sanitize_file_name(""), "upload");
    }
}
