use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Enumerates every file under `source_path`, yielding each path relative
/// to that root. Directories themselves are not yielded; ordering across
/// files is filesystem-dependent.
pub fn walk_source_files(source_path: &Path) -> impl Iterator<Item = Result<PathBuf>> + '_ {
    WalkDir::new(source_path)
        .into_iter()
        .filter(|entry| entry.as_ref().map_or(true, |e| e.file_type().is_file()))
        .map(move |entry| {
            let entry = entry.map_err(|e| Error::Io(e.into()))?;
            let relative_path = entry
                .path()
                .strip_prefix(source_path)
                .map_err(|e| Error::Config(e.to_string()))?;
            Ok(relative_path.to_path_buf())
        })
}
