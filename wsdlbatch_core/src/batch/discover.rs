//! Lists the WSDL files directly inside the input directory.

use crate::error::{BatchError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// A discovered input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    /// File name without any directory component.
    pub name: String,
    pub absolute_path: PathBuf,
}

/// Exact, case-sensitive suffix match on a file name.
pub fn suffix_filter(suffix: &str) -> impl Fn(&str) -> bool + '_ {
    move |name: &str| name.ends_with(suffix)
}

/// Returns the regular files in `dir` selected by `filter`, sorted by name.
///
/// `dir` must already be canonical. Every selected name is re-checked
/// against `suffix`; a filter that lets through anything else aborts the
/// run with [`BatchError::FilterInvariantViolation`]. Only selected entries
/// are inspected further, so unrelated entries such as broken symlinks
/// never affect the result.
pub fn discover_inputs(
    dir: &Path,
    suffix: &str,
    filter: &dyn Fn(&str) -> bool,
) -> Result<Vec<InputFile>> {
    let mut inputs = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| match e.into_io_error() {
            Some(io) => BatchError::Io(io),
            None => BatchError::invalid_directory(super::paths::INPUT_DIR_ROLE, dir),
        })?;

        let Some(name) = entry.file_name().to_str() else {
            warn!("Skipping non UTF-8 file name {:?}", entry.file_name());
            continue;
        };
        if !filter(name) {
            trace!("Ignoring {}", name);
            continue;
        }
        if !name.ends_with(suffix) {
            return Err(BatchError::FilterInvariantViolation {
                dir: dir.to_path_buf(),
                name: name.to_string(),
                suffix: suffix.to_string(),
            });
        }
        if !is_regular_file(&entry) {
            debug!("Ignoring {} (not a regular file)", name);
            continue;
        }

        inputs.push(InputFile {
            name: name.to_string(),
            absolute_path: dir.join(name),
        });
    }

    if inputs.is_empty() {
        return Err(BatchError::NoInputFiles {
            dir: dir.to_path_buf(),
            suffix: suffix.to_string(),
        });
    }

    debug!("Discovered {} input file(s) in {:?}", inputs.len(), dir);
    Ok(inputs)
}

/// Symlinks count when their target is a regular file. A dangling link is
/// skipped with a warning.
fn is_regular_file(entry: &DirEntry) -> bool {
    if !entry.path_is_symlink() {
        return entry.file_type().is_file();
    }
    match fs::metadata(entry.path()) {
        Ok(target) => target.is_file(),
        Err(e) => {
            warn!(
                "Skipping {}: cannot follow symlink ({})",
                entry.path().display(),
                e
            );
            false
        }
    }
}
