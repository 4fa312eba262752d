//! Loading and saving documents.
//!
//! `open_file` is used once at startup and its failure is fatal, so it
//! returns `anyhow::Result` with context. `save` is recoverable: the
//! dispatcher turns a `PersistError` into a status message and leaves the
//! dirty counter untouched.

use anyhow::{Context, Result};
use core_syntax::select_syntax;
use core_text::{Document, parse_lines};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("no file name")]
    NoFileName,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Read `path` into a document, one row per line, and pick its language.
pub fn open_file(path: &Path, tab_stop: usize) -> Result<Document> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to open {}", path.display()))?;
    let lines = parse_lines(&bytes);
    let mut doc = Document::from_lines(lines, tab_stop);
    doc.set_filename(Some(path.to_path_buf()));
    doc.set_syntax(select_syntax(path));
    info!(
        target: "io",
        path = %path.display(),
        bytes = bytes.len(),
        rows = doc.num_rows(),
        file_type = doc.syntax().map(|s| s.file_type),
        "file_opened"
    );
    Ok(doc)
}

/// Write the document to its file name. Returns the number of bytes written
/// and marks the document clean on success.
pub fn save(doc: &mut Document) -> Result<usize, PersistError> {
    let path = doc.filename().ok_or(PersistError::NoFileName)?.to_path_buf();
    let buf = doc.serialize();
    match write_exact(&path, &buf) {
        Ok(()) => {
            doc.clear_dirty();
            info!(target: "io", path = %path.display(), bytes = buf.len(), "file_saved");
            Ok(buf.len())
        }
        Err(e) => {
            error!(target: "io", path = %path.display(), error = %e, "file_write_error");
            Err(e.into())
        }
    }
}

/// Create-or-open, size to `buf.len()`, then write. The file is never
/// truncated to empty before the new contents are ready to go in.
fn write_exact(path: &Path, buf: &[u8]) -> io::Result<()> {
    let mut opts = OpenOptions::new();
    opts.read(true).write(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o644);
    }
    let mut file = opts.open(path)?;
    file.set_len(buf.len() as u64)?;
    file.write_all(buf)?;
    file.flush()
}
