//! Ensemble forecast file discovery.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::IoError;

/// List the NetCDF files in `dir`, sorted by path in descending order.
///
/// Matches regular files whose name ends in `.nc`, case-insensitively.
/// Subdirectories are ignored.
pub fn discover_prediction_files(dir: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !dir.exists() {
        return Err(IoError::FileNotFound {
            path: dir.to_path_buf(),
        });
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| IoError::io(dir, e))? {
        let path = entry.map_err(|e| IoError::io(dir, e))?.path();
        let is_nc = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.to_ascii_lowercase().ends_with(".nc"));
        if is_nc && path.is_file() {
            files.push(path);
        }
    }
    files.sort_unstable_by(|a, b| b.cmp(a));
    Ok(files)
}

/// Ensemble member number: the integer after the last `_` of the file stem.
///
/// `Qout_erai_region_52.nc` is member 52.
pub fn ensemble_member(path: &Path) -> Option<u32> {
    path.file_stem()?
        .to_str()?
        .rsplit('_')
        .next()?
        .parse()
        .ok()
}
