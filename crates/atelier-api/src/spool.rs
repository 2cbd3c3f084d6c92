//! Disk spool for uploaded images.
//!
//! Uploads are written to a temp file for the duration of the request and
//! removed when the [`UploadSpool`] guard drops, whichever way the request
//! exits. A failed deletion is logged at WARN and otherwise ignored.

use std::fs;
use std::path::{Path, PathBuf};

use atelier_core::Result;
use uuid::Uuid;

/// A spooled upload on disk, deleted on drop.
#[derive(Debug)]
pub struct UploadSpool {
    path: PathBuf,
    mime_type: String,
    len: usize,
}

impl UploadSpool {
    /// Write `data` to a fresh file under `dir` and return the guard.
    pub fn write(dir: &Path, mime_type: &str, data: &[u8]) -> Result<Self> {
        let path = dir.join(format!("atelier-upload-{}", Uuid::now_v7()));
        fs::write(&path, data)?;
        Ok(Self {
            path,
            mime_type: mime_type.to_string(),
            len: data.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read the spooled bytes back from disk.
    pub fn read(&self) -> Result<Vec<u8>> {
        Ok(fs::read(&self.path)?)
    }
}

impl Drop for UploadSpool {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to delete spooled upload"
                );
            }
        }
    }
}
