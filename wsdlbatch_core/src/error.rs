use crate::compiler::CompileError;
use std::path::PathBuf;
use thiserror::Error;

/// Exit status for malformed invocations.
pub const EXIT_USAGE: u8 = 2;

/// Exit status for every failure detected while running.
pub const EXIT_FAILURE: u8 = 1;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Input {role} '{path}' does not exist or is not a directory")]
    InvalidDirectory { role: &'static str, path: PathBuf },

    #[error("Input wsdldir '{dir}' does not contain any {suffix} files")]
    NoInputFiles { dir: PathBuf, suffix: String },

    #[error("Software error: input wsdldir '{dir}' produced listing of non-{suffix} file '{name}'")]
    FilterInvariantViolation {
        dir: PathBuf,
        name: String,
        suffix: String,
    },

    #[error("Could not delete stale artifact {path}: {source}")]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Compilation of {input} failed")]
    Compilation {
        input: PathBuf,
        #[source]
        source: CompileError,
    },

    #[error("Template error: {0}")]
    Template(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, BatchError>;

impl BatchError {
    pub fn usage(message: impl Into<String>) -> Self {
        BatchError::Usage(message.into())
    }

    pub fn invalid_directory(role: &'static str, path: impl Into<PathBuf>) -> Self {
        BatchError::InvalidDirectory {
            role,
            path: path.into(),
        }
    }

    pub fn template(message: impl Into<String>) -> Self {
        BatchError::Template(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        BatchError::Config(message.into())
    }

    /// Process exit status this error terminates the run with.
    pub fn exit_code(&self) -> u8 {
        match self {
            BatchError::Usage(_) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }

    /// Whether `main` should print the usage text along with the diagnostic.
    pub fn shows_usage(&self) -> bool {
        matches!(
            self,
            BatchError::Usage(_)
                | BatchError::InvalidDirectory { .. }
                | BatchError::NoInputFiles { .. }
                | BatchError::FilterInvariantViolation { .. }
        )
    }
}
