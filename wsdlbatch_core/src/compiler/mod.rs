//! The seam between the batch pipeline and the WSDL compiler.
//!
//! The pipeline never parses WSDL or builds archives itself. It hands each
//! input to a [`Compiler`] together with the shared [`TemplateSource`].
//! [`CommandCompiler`] runs an external compiler program; tests and
//! embedders can supply their own implementation.

mod command;
mod templates;

pub use command::*;
pub use templates::*;

use std::path::Path;
use std::process::ExitStatus;
use thiserror::Error;

/// Everything one compile call needs besides the templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileJob<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub package_prefix: Option<&'a str>,
    pub standalone: bool,
    /// Never stop to ask for confirmation.
    pub suppress_prompt: bool,
}

/// Receives progress messages from a compiler run.
pub trait CompileListener {
    fn on_message(&self, message: &str);
}

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("failed to start compiler {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("compiler {program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("{0}")]
    Rejected(String),
}

/// Compiles one WSDL file into one artifact.
///
/// Implementations must not delete an existing artifact at the output path;
/// the pipeline clears stale artifacts before the first call.
pub trait Compiler {
    fn compile(
        &self,
        job: &CompileJob<'_>,
        templates: &TemplateSource,
        listener: Option<&dyn CompileListener>,
    ) -> Result<(), CompileError>;
}
