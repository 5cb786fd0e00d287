//! The batch pipeline: resolve directories, discover inputs, map outputs,
//! clear stale artifacts, then compile every input in order.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wsdlbatch_core::batch::{BatchRun, RunRequest};
//! use wsdlbatch_core::compiler::CommandCompiler;
//! use wsdlbatch_core::config::BatchConfig;
//!
//! let config = BatchConfig::load()?;
//! let request = RunRequest::new("build/wsdl", "build/jars", &config);
//! let compiler = CommandCompiler::new(&config.compiler);
//! let report = BatchRun::new(request, config).run(&compiler)?;
//! println!("compiled {} file(s)", report.compiled.len());
//! # Ok::<(), wsdlbatch_core::BatchError>(())
//! ```

mod cleanup;
mod discover;
mod invoke;
mod mapping;
mod paths;

pub use cleanup::*;
pub use discover::*;
pub use invoke::*;
pub use mapping::*;
pub use paths::*;

use crate::compiler::{Compiler, TEMPLATE_DELIMITER, TemplateSource};
use crate::config::BatchConfig;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What one run was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub package_prefix: Option<String>,
    pub standalone: bool,
}

impl RunRequest {
    /// Builds a request from the two raw directory arguments, taking the
    /// package prefix and standalone flag from `config`.
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        config: &BatchConfig,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            package_prefix: config.package_prefix.clone(),
            standalone: config.standalone,
        }
    }
}

/// Summary of a batch in which every input compiled.
#[derive(Debug)]
pub struct BatchReport {
    /// Mappings compiled, in compile order.
    pub compiled: Vec<OutputMapping>,
    /// Stale artifacts deleted before compiling.
    pub removed: Vec<PathBuf>,
    /// Stale artifacts that could not be deleted.
    pub cleanup_failures: Vec<PathBuf>,
}

/// One execution of the pipeline.
pub struct BatchRun {
    request: RunRequest,
    config: BatchConfig,
}

impl BatchRun {
    pub fn new(request: RunRequest, config: BatchConfig) -> Self {
        Self { request, config }
    }

    /// Runs every stage with the default suffix filter.
    pub fn run(&self, compiler: &dyn Compiler) -> Result<BatchReport> {
        let filter = suffix_filter(&self.config.suffixes.input);
        self.run_with_filter(compiler, &filter)
    }

    /// Runs every stage, selecting inputs with `filter`.
    ///
    /// Nothing on disk is touched until directories and inputs have been
    /// validated.
    pub fn run_with_filter(
        &self,
        compiler: &dyn Compiler,
        filter: &dyn Fn(&str) -> bool,
    ) -> Result<BatchReport> {
        let suffixes = &self.config.suffixes;
        let dirs = resolve_directories(&self.request.input_dir, &self.request.output_dir)?;

        let inputs = discover_inputs(&dirs.input_dir, &suffixes.input, filter)?;
        info!(
            "Found {} {} file(s) in {}",
            inputs.len(),
            suffixes.input,
            dirs.input_dir.display()
        );

        let mappings = map_outputs(inputs, &dirs.output_dir, suffixes)?;

        let cleanup = remove_stale_artifacts(&mappings);
        debug!(
            "Cleanup removed {} stale artifact(s), {} failure(s)",
            cleanup.removed.len(),
            cleanup.failures.len()
        );

        let templates = open_templates(&self.config.template_dir)?;
        let compiled =
            BatchInvoker::new(compiler, &templates).invoke_all(&self.request, &mappings)?;
        info!("Compiled {} file(s) into {}", compiled, dirs.output_dir.display());

        Ok(BatchReport {
            compiled: mappings,
            removed: cleanup.removed,
            cleanup_failures: cleanup.failures,
        })
    }
}

fn open_templates(location: &Path) -> Result<TemplateSource> {
    TemplateSource::open(location, TEMPLATE_DELIMITER, TEMPLATE_DELIMITER)
}
