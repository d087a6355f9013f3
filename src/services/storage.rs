use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::{self, File};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use uuid::Uuid;

/// Read/write chunk size while streaming an upload to disk
const COPY_CHUNK_SIZE: usize = 8192;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("file exceeds maximum size of {0} bytes")]
    TooLarge(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug)]
pub struct SaveResult {
    pub stored_path: PathBuf,
    pub size: u64,
}

/// Filesystem storage backend. Files are named by their upload id, so the
/// client-supplied filename is never used as a path component.
pub struct StorageService {
    base_dir: PathBuf,
    max_file_size: usize,
}

impl StorageService {
    /// Creates the upload directory if it does not exist yet.
    pub async fn create(base_dir: impl Into<PathBuf>, max_file_size: usize) -> std::io::Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).await?;
        Ok(Self {
            base_dir,
            max_file_size,
        })
    }

    pub fn path_for(&self, id: &Uuid) -> PathBuf {
        self.base_dir.join(id.to_string())
    }

    /// Streams an upload to disk, enforcing the size cap as bytes arrive.
    /// On failure the partial file is removed before the error is returned.
    pub async fn save<R>(&self, id: &Uuid, mut reader: R) -> Result<SaveResult, SaveError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let stored_path = self.path_for(id);
        let mut file = File::create(&stored_path).await?;
        let mut buffer = [0u8; COPY_CHUNK_SIZE];
        let mut total_size: u64 = 0;

        loop {
            let n = match reader.read(&mut buffer).await {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    self.discard_partial(&mut file, &stored_path).await;
                    return Err(e.into());
                }
            };

            total_size += n as u64;
            if total_size > self.max_file_size as u64 {
                self.discard_partial(&mut file, &stored_path).await;
                return Err(SaveError::TooLarge(self.max_file_size));
            }

            if let Err(e) = file.write_all(&buffer[..n]).await {
                self.discard_partial(&mut file, &stored_path).await;
                return Err(e.into());
            }
        }

        file.flush().await?;

        Ok(SaveResult {
            stored_path,
            size: total_size,
        })
    }

    pub async fn open(&self, path: &Path) -> std::io::Result<File> {
        File::open(path).await
    }

    /// Removes a stored file. An already-missing file is not an error, so
    /// deletion stays idempotent; returns whether a file was actually removed.
    pub async fn delete(&self, path: &Path) -> std::io::Result<bool> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn discard_partial(&self, file: &mut File, path: &Path) {
        let _ = file.shutdown().await;
        if let Err(e) = fs::remove_file(path).await {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!("Failed to remove partial upload {}: {}", path.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn service(max: usize) -> (TempDir, StorageService) {
        let dir = TempDir::new().unwrap();
        let storage = StorageService::create(dir.path(), max).await.unwrap();
        (dir, storage)
    }

    #[tokio::test]
    async fn test_save_and_read_round_trip() {
        let (_dir, storage) = service(1024).await;
        let id = Uuid::new_v4();

        let result = storage.save(&id, &b"hello bytes"[..]).await.unwrap();
        assert_eq!(result.size, 11);
        assert_eq!(result.stored_path, storage.path_for(&id));

        let contents = fs::read(&result.stored_path).await.unwrap();
        assert_eq!(contents, b"hello bytes");
    }

    #[tokio::test]
    async fn test_oversize_upload_is_rejected_and_partial_removed() {
        let (_dir, storage) = service(10).await;
        let id = Uuid::new_v4();

        let err = storage.save(&id, &[0u8; 64][..]).await.unwrap_err();
        assert!(matches!(err, SaveError::TooLarge(10)));
        assert!(!storage.path_for(&id).exists());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (_dir, storage) = service(1024).await;
        let id = Uuid::new_v4();
        let result = storage.save(&id, &b"x"[..]).await.unwrap();

        assert!(storage.delete(&result.stored_path).await.unwrap());
        assert!(!storage.delete(&result.stored_path).await.unwrap());
    }
}
