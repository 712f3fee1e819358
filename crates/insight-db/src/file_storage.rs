//! Object storage for uploaded document bytes.
//!
//! Objects are addressed by keys of the form `<user_id>/<random_id>.<ext>`
//! inside a named bucket. The filesystem backend maps a bucket to a
//! directory under its base path.
//!
//! ```rust,ignore
//! use insight_db::file_storage::{generate_storage_path, FilesystemBackend, StorageBackend};
//!
//! let backend = FilesystemBackend::new("/var/lib/insight/files", "documents");
//! let key = generate_storage_path(&user_id, Some("pdf"));
//! backend.write(&key, &bytes).await?;
//! ```

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use insight_core::{Error, Result};

/// Storage backend trait for different storage implementations.
///
/// Allows abstracting over the local filesystem or a hosted bucket.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Write data to the specified key.
    async fn write(&self, path: &str, data: &[u8]) -> Result<()>;
}

/// Filesystem storage backend.
///
/// Path format: `{base_path}/{bucket}/{user_id}/{random_id}.{ext}`
pub struct FilesystemBackend {
    root: PathBuf,
}

impl FilesystemBackend {
    /// Create a new filesystem backend rooted at `base_path/bucket`.
    pub fn new(base_path: impl Into<PathBuf>, bucket: &str) -> Self {
        Self {
            root: base_path.into().join(bucket),
        }
    }

    /// Resolve a key under the bucket directory, rejecting traversal.
    fn full_path(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let clean = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if path.is_empty() || !clean {
            return Err(Error::InvalidInput(format!("invalid storage key: {}", path)));
        }
        Ok(self.root.join(relative))
    }

    /// Validate that the storage backend can write, read, and delete files.
    ///
    /// Performs a round trip at startup to catch permission errors and
    /// missing directories early.
    pub async fn validate(&self) -> std::result::Result<(), String> {
        let test_dir = self.root.join(".health-check");
        let test_file = test_dir.join("test.bin");

        fs::create_dir_all(&test_dir)
            .await
            .map_err(|e| format!("create_dir_all({:?}): {}", test_dir, e))?;

        let data = b"storage-health-check";
        fs::write(&test_file, data)
            .await
            .map_err(|e| format!("write({:?}): {}", test_file, e))?;

        let read_data = fs::read(&test_file)
            .await
            .map_err(|e| format!("read({:?}): {}", test_file, e))?;
        if read_data != data {
            return Err("read-back mismatch".to_string());
        }

        fs::remove_file(&test_file)
            .await
            .map_err(|e| format!("remove_file({:?}): {}", test_file, e))?;
        let _ = fs::remove_dir(&test_dir).await;

        Ok(())
    }
}

#[async_trait]
impl StorageBackend for FilesystemBackend {
    async fn write(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path)?;
        debug!(
            subsystem = "storage",
            storage_path = %path,
            full_path = %full_path.display(),
            size = data.len(),
            "file_storage: write"
        );

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                warn!(parent = %parent.display(), error = %e, "file_storage: create_dir_all failed");
                e
            })?;
        }

        // Atomic write: temp file + rename
        let temp_path = full_path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            warn!(temp_path = %temp_path.display(), error = %e, "file_storage: File::create failed");
            e
        })?;
        file.write_all(data).await.map_err(|e| {
            warn!(error = %e, "file_storage: write_all failed");
            e
        })?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, &full_path).await.map_err(|e| {
            warn!(from = %temp_path.display(), to = %full_path.display(), error = %e, "file_storage: rename failed");
            e
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&full_path, std::fs::Permissions::from_mode(0o644)).await?;
        }

        Ok(())
    }
}

/// Generate the storage key for a new upload.
///
/// Key format: `{user_id}/{random_uuid}.{ext}`, or `{user_id}/{random_uuid}`
/// when the filename has no extension.
pub fn generate_storage_path(user_id: &Uuid, extension: Option<&str>) -> String {
    let object_id = Uuid::new_v4();
    match extension {
        Some(ext) if !ext.is_empty() => format!("{}/{}.{}", user_id, object_id, ext),
        _ => format!("{}/{}", user_id, object_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_storage_path_format() {
        let user_id = Uuid::now_v7();
        let path = generate_storage_path(&user_id, Some("pdf"));

        let (owner, object) = path.split_once('/').unwrap();
        assert_eq!(owner, user_id.to_string());
        let (stem, ext) = object.rsplit_once('.').unwrap();
        assert_eq!(ext, "pdf");
        assert!(Uuid::parse_str(stem).is_ok());
    }

    #[test]
    fn test_generate_storage_path_is_unique() {
        let user_id = Uuid::now_v7();
        let a = generate_storage_path(&user_id, Some("txt"));
        let b = generate_storage_path(&user_id, Some("txt"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_generate_storage_path_without_extension() {
        let user_id = Uuid::now_v7();
        let path = generate_storage_path(&user_id, None);
        assert!(!path.contains('.'));
    }

    #[tokio::test]
    async fn test_filesystem_write_lands_under_bucket() {
        let dir = TempDir::new().unwrap();
        let backend = FilesystemBackend::new(dir.path(), "documents");
        let key = generate_storage_path(&Uuid::now_v7(), Some("txt"));

        backend.write(&key, b"hello world").await.unwrap();

        let on_disk = dir.path().join("documents").join(&key);
        assert_eq!(std::fs::read(&on_disk).unwrap(), b"hello world");
        // No temp file left behind
        assert!(!on_disk.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_filesystem_write_replaces_existing_object() {
        let dir = TempDir::new().unwrap();
        let backend = FilesystemBackend::new(dir.path(), "documents");

        backend.write("u/a.txt", b"first").await.unwrap();
        backend.write("u/a.txt", b"second").await.unwrap();
        let on_disk = dir.path().join("documents/u/a.txt");
        assert_eq!(std::fs::read(on_disk).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_filesystem_rejects_traversal() {
        let dir = TempDir::new().unwrap();
        let backend = FilesystemBackend::new(dir.path(), "documents");

        let err = backend.write("../escape.txt", b"x").await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        let err = backend.write("/tmp/abs.txt", b"x").await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(backend.write("", b"x").await.is_err());
    }

    #[tokio::test]
    async fn test_filesystem_validate() {
        let dir = TempDir::new().unwrap();
        let backend = FilesystemBackend::new(dir.path(), "documents");
        backend.validate().await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_filesystem_write_sets_0644() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let backend = FilesystemBackend::new(dir.path(), "documents");
        backend.write("u/file.csv", b"a,b\n").await.unwrap();

        let meta = std::fs::metadata(dir.path().join("documents/u/file.csv")).unwrap();
        assert_eq!(meta.permissions().mode() & 0o777, 0o644);
    }
}
