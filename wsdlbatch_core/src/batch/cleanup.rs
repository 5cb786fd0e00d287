//! Removes artifacts left behind by an earlier run.
//!
//! The compiler never deletes an existing artifact, so every stale one is
//! removed in a single pass before the first compile call.

use super::OutputMapping;
use crate::error::BatchError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Outcome of the cleanup pass.
#[derive(Debug, Default)]
pub struct CleanupSummary {
    /// Artifacts that existed and were deleted.
    pub removed: Vec<PathBuf>,
    /// Artifacts that could not be deleted. The run continues regardless.
    pub failures: Vec<PathBuf>,
}

/// Deletes whatever already exists at each mapping's output path.
pub fn remove_stale_artifacts(mappings: &[OutputMapping]) -> CleanupSummary {
    let mut summary = CleanupSummary::default();

    for mapping in mappings {
        let path = &mapping.output_path;
        match fs::symlink_metadata(path) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(source) => {
                record_failure(&mut summary, path, source);
                continue;
            }
        }

        info!("Deleting existing {}", path.display());
        match fs::remove_file(path) {
            Ok(()) => summary.removed.push(path.clone()),
            Err(source) => record_failure(&mut summary, path, source),
        }
    }

    summary
}

fn record_failure(summary: &mut CleanupSummary, path: &Path, source: io::Error) {
    let failure = BatchError::Cleanup {
        path: path.to_path_buf(),
        source,
    };
    warn!("{}", failure);
    summary.failures.push(path.to_path_buf());
}
