//! Sequential, fail-fast compilation of a batch.

use super::{OutputMapping, RunRequest};
use crate::compiler::{CompileJob, Compiler, TemplateSource};
use crate::error::{BatchError, Result};
use tracing::{debug, error, info};

/// Runs one compiler over every mapping with a single shared template source.
pub struct BatchInvoker<'a> {
    compiler: &'a dyn Compiler,
    templates: &'a TemplateSource,
}

impl<'a> BatchInvoker<'a> {
    pub fn new(compiler: &'a dyn Compiler, templates: &'a TemplateSource) -> Self {
        Self {
            compiler,
            templates,
        }
    }

    /// Compiles the mappings in order and stops at the first failure.
    ///
    /// Returns the number of inputs compiled.
    pub fn invoke_all(&self, request: &RunRequest, mappings: &[OutputMapping]) -> Result<usize> {
        for (index, mapping) in mappings.iter().enumerate() {
            let job = CompileJob {
                input: &mapping.input.absolute_path,
                output: &mapping.output_path,
                package_prefix: request.package_prefix.as_deref(),
                standalone: request.standalone,
                suppress_prompt: true,
            };

            info!(
                "Running compiler on {}\n       to create {}",
                job.input.display(),
                job.output.display()
            );

            if let Err(source) = self.compiler.compile(&job, self.templates, None) {
                error!(
                    "Compilation {} of {} failed, skipping the remaining {}",
                    index + 1,
                    mappings.len(),
                    mappings.len() - index - 1
                );
                return Err(BatchError::Compilation {
                    input: mapping.input.absolute_path.clone(),
                    source,
                });
            }
            debug!("Compiled {}", mapping.input.name);
        }
        Ok(mappings.len())
    }
}
