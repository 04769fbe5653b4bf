//! Diff-gated writes
//!
//! The only code that writes generated artifacts. A file is replaced in full
//! (temp file + rename in the same directory) or not touched at all.

use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::error::GenError;

/// What happened to a target file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

/// Result of comparing rendered text against disk without writing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    InSync,
    OutOfSync,
    Missing,
}

/// True when `path` is absent or its contents differ from `new_contents`.
///
/// Comparison is exact: no line-ending or whitespace normalization. A file that
/// is not valid UTF-8 always differs.
pub fn should_write(path: &Path, new_contents: &str) -> std::io::Result<bool> {
    Ok(check(path, new_contents)? != SyncState::InSync)
}

/// Compare `new_contents` with the file at `path`.
pub fn check(path: &Path, new_contents: &str) -> std::io::Result<SyncState> {
    match std::fs::read(path) {
        Ok(existing) if existing == new_contents.as_bytes() => Ok(SyncState::InSync),
        Ok(_) => Ok(SyncState::OutOfSync),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(SyncState::Missing),
        Err(e) => Err(e),
    }
}

/// Write `contents` to `path` unless the file already holds exactly that text.
pub fn write_if_changed(path: &Path, contents: &str) -> Result<WriteOutcome, GenError> {
    if !should_write(path, contents).map_err(|e| GenError::io(path, e))? {
        tracing::debug!("No changes detected in {}; skipping rewrite", path.display());
        return Ok(WriteOutcome::Unchanged);
    }

    replace_atomically(path, contents)?;
    tracing::info!("Wrote {}", path.display());
    Ok(WriteOutcome::Written)
}

/// Write `contents` to `path` only if nothing exists there yet.
///
/// An existing file is never compared or overwritten.
pub fn create_if_absent(path: &Path, contents: &str) -> Result<WriteOutcome, GenError> {
    if path.exists() {
        tracing::debug!("{} already exists; leaving it alone", path.display());
        return Ok(WriteOutcome::Unchanged);
    }

    replace_atomically(path, contents)?;
    tracing::info!("Created {}", path.display());
    Ok(WriteOutcome::Written)
}

fn replace_atomically(path: &Path, contents: &str) -> Result<(), GenError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| GenError::io(dir, e))?;

    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| GenError::io(dir, e))?;
    temp.write_all(contents.as_bytes())
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| GenError::io(temp.path(), e))?;
    temp.persist(path).map_err(|e| GenError::io(path, e.error))?;
    Ok(())
}
