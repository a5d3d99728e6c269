//! Timestamped backup copies taken before a resource file is rewritten.

use std::path::{Path, PathBuf};

use crate::error::Error;

/// Local-time slug shared by backup names and exported sheet names.
pub fn timestamp_slug() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Backup sibling for `path`, with the suffix appended after the original
/// file name: `app_en.arb` becomes `app_en.arb.20240131_120000.bak`.
pub fn backup_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}.{}.bak", name, timestamp_slug()))
}

/// Copies `path` to its backup sibling and returns the backup path.
///
/// The copy must complete before any destructive write to `path` begins, so
/// callers take the backup first and only then rewrite the original.
pub fn create_backup(path: &Path) -> Result<PathBuf, Error> {
    let target = backup_path(path);
    std::fs::copy(path, &target).map_err(Error::Io)?;
    Ok(target)
}
