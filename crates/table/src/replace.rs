//! Atomic whole-file replacement.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::TableError;
use crate::schema::Delimiter;
use crate::table::StreamInfoTable;

/// Sibling temp path `<stem>_temp.txt` used while rewriting `path`.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}_temp.txt"))
}

/// Write a new version of `path` through `f`, then atomically swap it in.
///
/// `f` writes into a buffered sibling temp file. On success the file is
/// flushed, synced and renamed over `path`. If `f` or any later step fails
/// the original file is left untouched and the temp file is removed.
///
/// # Errors
///
/// Returns [`TableError::Io`] for any failure, naming the temp file for
/// write errors and `path` for the final rename.
pub fn replace_with<F>(path: &Path, f: F) -> Result<(), TableError>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let temp = temp_path_for(path);
    let result = write_temp(&temp, f).and_then(|()| {
        fs::rename(&temp, path).map_err(|e| TableError::io(path, e))
    });
    if let Err(e) = &result {
        warn!(path = %path.display(), error = %e, "replace failed, original left in place");
        if temp.exists() {
            let _ = fs::remove_file(&temp);
        }
    }
    result
}

fn write_temp<F>(temp: &Path, f: F) -> Result<(), TableError>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let file = File::create(temp).map_err(|e| TableError::io(temp, e))?;
    let mut w = BufWriter::new(file);
    f(&mut w).map_err(|e| TableError::io(temp, e))?;
    w.flush().map_err(|e| TableError::io(temp, e))?;
    w.get_ref()
        .sync_all()
        .map_err(|e| TableError::io(temp, e))
}

impl StreamInfoTable {
    /// Atomically replace `path` with this table.
    pub fn replace(&self, path: &Path, delimiter: Delimiter) -> Result<(), TableError> {
        replace_with(path, |w| self.write(w, delimiter))?;
        info!(
            path = %path.display(),
            rows = self.len(),
            schema = ?self.schema(),
            "stream info table replaced"
        );
        Ok(())
    }
}
