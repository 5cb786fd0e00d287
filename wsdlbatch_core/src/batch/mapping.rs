//! Derives the artifact path for every discovered WSDL file.

use super::InputFile;
use crate::config::SuffixPair;
use crate::error::{BatchError, Result};
use std::path::{Path, PathBuf};

/// One input and the artifact it compiles to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputMapping {
    pub input: InputFile,
    pub output_path: PathBuf,
}

/// Replaces the trailing input suffix of `name` with the output suffix.
///
/// Only the suffix at the end is replaced, so `a.wsdl.v2.wsdl` maps to
/// `a.wsdl.v2.apextest.jar`. Returns `None` when `name` does not end with
/// the input suffix.
pub fn output_name(name: &str, suffixes: &SuffixPair) -> Option<String> {
    name.strip_suffix(suffixes.input.as_str())
        .map(|stem| format!("{stem}{}", suffixes.output))
}

/// Maps every input to its artifact path inside `output_dir`, keeping order.
pub fn map_outputs(
    inputs: Vec<InputFile>,
    output_dir: &Path,
    suffixes: &SuffixPair,
) -> Result<Vec<OutputMapping>> {
    inputs
        .into_iter()
        .map(|input| {
            let name = output_name(&input.name, suffixes).ok_or_else(|| {
                BatchError::FilterInvariantViolation {
                    dir: input
                        .absolute_path
                        .parent()
                        .map(Path::to_path_buf)
                        .unwrap_or_default(),
                    name: input.name.clone(),
                    suffix: suffixes.input.clone(),
                }
            })?;
            Ok(OutputMapping {
                output_path: output_dir.join(name),
                input,
            })
        })
        .collect()
}
