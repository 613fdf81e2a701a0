//! Delivery targets for generated files.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use super::client::GeneratedFile;

const FALLBACK_FILENAME: &str = "agreement.pdf";

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to create download directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where a generated file is handed to the user.
#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Deliver the file and return a description of where it went.
    async fn deliver(&self, file: &GeneratedFile) -> Result<String, DeliveryError>;
}

/// Writes downloads into a directory.
///
/// The on-disk name is sanitized; the declared filename is left untouched.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        let safe = sanitize_filename::sanitize(filename);
        let safe = if safe.is_empty() {
            FALLBACK_FILENAME.to_string()
        } else {
            safe
        };
        self.dir.join(safe)
    }
}

#[async_trait]
impl DownloadSink for DirectorySink {
    async fn deliver(&self, file: &GeneratedFile) -> Result<String, DeliveryError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| DeliveryError::CreateDir {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.path_for(&file.filename);
        tokio::fs::write(&path, &file.bytes)
            .await
            .map_err(|source| DeliveryError::Write {
                path: path.clone(),
                source,
            })?;

        log::info!("saved {} ({} bytes)", path.display(), file.bytes.len());
        Ok(path.display().to_string())
    }
}

/// Keeps delivered files in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: Arc<Mutex<Vec<GeneratedFile>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> Vec<GeneratedFile> {
        self.files.lock().clone()
    }

    /// Remove and return the most recent delivery.
    pub fn take_last(&self) -> Option<GeneratedFile> {
        self.files.lock().pop()
    }
}

#[async_trait]
impl DownloadSink for MemorySink {
    async fn deliver(&self, file: &GeneratedFile) -> Result<String, DeliveryError> {
        self.files.lock().push(file.clone());
        Ok(format!("memory:{}", file.filename))
    }
}
