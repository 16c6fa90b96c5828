//! # Writing Generated Files
//!
//! Rendered text is written with three guarantees:
//!
//! 1.  **Directories on demand**: missing parent directories are created; an
//!     existing directory is not an error.
//!
//! 2.  **Idempotence**: when the file already holds exactly the new content,
//!     nothing is written and its modification time is left alone. Rerunning
//!     the generator against unchanged tags therefore produces no diff.
//!
//! 3.  **No torn files**: content goes to a temporary file in the destination
//!     directory which is then renamed over the target. Readers see either
//!     the old file or the new one. The temporary file is removed if anything
//!     fails before the rename.
//!
//! New files get mode `0644` on Unix; replaced files keep their mode.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// What `write_file` did to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Updated,
    Unchanged,
}

/// A rendered artifact and the path it belongs at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn write(&self) -> Result<WriteOutcome> {
        write_file(&self.path, &self.content)
    }
}

/// Write `content` to `path`, skipping the write when nothing changed.
pub fn write_file(path: &Path, content: &str) -> Result<WriteOutcome> {
    let write_error = |message: String| Error::Write {
        path: path.to_path_buf(),
        message,
    };

    let existing = match fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(write_error(format!("Failed to read existing file: {}", e))),
    };

    if existing.as_deref() == Some(content.as_bytes()) {
        debug!("Unchanged: {}", path.display());
        return Ok(WriteOutcome::Unchanged);
    }

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| {
        write_error(format!(
            "Failed to create directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    let mut staged = NamedTempFile::new_in(parent)
        .map_err(|e| write_error(format!("Failed to create temporary file: {}", e)))?;
    staged
        .write_all(content.as_bytes())
        .and_then(|_| staged.flush())
        .map_err(|e| write_error(format!("Failed to write content: {}", e)))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = match fs::metadata(path) {
            Ok(meta) => meta.permissions().mode() & 0o7777,
            Err(_) => 0o644,
        };
        fs::set_permissions(staged.path(), fs::Permissions::from_mode(mode))
            .map_err(|e| write_error(format!("Failed to set permissions: {}", e)))?;
    }

    staged
        .persist(path)
        .map_err(|e| write_error(format!("Failed to move file into place: {}", e.error)))?;

    Ok(if existing.is_some() {
        WriteOutcome::Updated
    } else {
        WriteOutcome::Created
    })
}
