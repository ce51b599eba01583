//! Document output: standard output or an atomically written file.

use roledoc_core::{Error, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes a document to standard output.
///
/// # Errors
///
/// Returns [`Error::OutputWrite`] if standard output is closed or fails.
pub fn print_document(content: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(content.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|source| Error::OutputWrite {
            path: "<stdout>".to_string(),
            source,
        })
}

/// Writes a document to `path` atomically.
///
/// The content goes to a hidden temporary file next to `path`, which is then
/// renamed over the destination. Readers never observe a partial document.
/// On failure the temporary file is removed and the destination is left
/// untouched.
///
/// # Errors
///
/// Returns [`Error::OutputWrite`] carrying the OS error if the file cannot be
/// created, written, synced, or renamed.
pub fn write_document(path: &Path, content: &str) -> Result<()> {
    let fail = |source: io::Error| Error::OutputWrite {
        path: path.display().to_string(),
        source,
    };

    let temp_path = temp_path_for(path).ok_or_else(|| {
        fail(io::Error::new(
            io::ErrorKind::InvalidInput,
            "destination has no file name",
        ))
    })?;

    let result = write_temp(&temp_path, content).and_then(|()| fs::rename(&temp_path, path));
    if let Err(source) = result {
        if let Err(e) = fs::remove_file(&temp_path) {
            debug!(path = %temp_path.display(), "temporary file not removed: {e}");
        }
        return Err(fail(source));
    }

    debug!(path = %path.display(), bytes = content.len(), "wrote document");
    Ok(())
}

fn temp_path_for(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?;
    Some(path.with_file_name(format!(".{}.tmp", name.to_string_lossy())))
}

fn write_temp(path: &Path, content: &str) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()
}
