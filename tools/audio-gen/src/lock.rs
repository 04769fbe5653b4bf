//! Mutual exclusion for generation runs
//!
//! A run holds an exclusive advisory lock on a file in the output directory
//! until the guard drops. Each guard opens its own handle, so a second run
//! is refused whether it comes from another process or from this one.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::GenError;

pub const LOCK_FILE_NAME: &str = ".audio-gen.lock";

/// Held for the duration of one `generate()` call
pub struct RunGuard {
    file: File,
    path: PathBuf,
}

impl RunGuard {
    /// Take the lock, or fail with [`GenError::RunInProgress`].
    pub fn acquire(output_dir: &Path) -> Result<Self, GenError> {
        let path = output_dir.join(LOCK_FILE_NAME);

        std::fs::create_dir_all(output_dir).map_err(|e| GenError::io(output_dir, e))?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| GenError::io(&path, e))?;

        if file.try_lock_exclusive().is_err() {
            return Err(GenError::RunInProgress { lock_path: path });
        }

        tracing::debug!("Acquired {}", path.display());
        Ok(Self { file, path })
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!("Failed to release {}: {}", self.path.display(), e);
        }
    }
}
