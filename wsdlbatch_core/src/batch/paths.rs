//! Canonicalisation and validation of the two working directories.

use crate::error::{BatchError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const INPUT_DIR_ROLE: &str = "wsdldir";
pub const OUTPUT_DIR_ROLE: &str = "jardir";

/// Canonical forms of the WSDL and artifact directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDirs {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

/// Resolves both directories. The input directory is checked first.
pub fn resolve_directories(raw_input: &Path, raw_output: &Path) -> Result<ResolvedDirs> {
    let input_dir = resolve_directory(INPUT_DIR_ROLE, raw_input)?;
    let output_dir = resolve_directory(OUTPUT_DIR_ROLE, raw_output)?;
    Ok(ResolvedDirs {
        input_dir,
        output_dir,
    })
}

/// Canonicalises `raw`, failing unless it names an existing directory.
pub fn resolve_directory(role: &'static str, raw: &Path) -> Result<PathBuf> {
    let canonical =
        fs::canonicalize(raw).map_err(|_| BatchError::invalid_directory(role, raw))?;
    if !canonical.is_dir() {
        return Err(BatchError::invalid_directory(role, raw));
    }
    debug!("Resolved {} {:?} to {:?}", role, raw, canonical);
    Ok(canonical)
}
