// wsdlbatch - compiles a directory of WSDL files into uniquely named artifacts

pub mod batch;
pub mod compiler;
pub mod config;
pub mod error;

// Re-export commonly used items for convenience
pub use batch::{BatchReport, BatchRun, RunRequest};
pub use compiler::{CommandCompiler, Compiler, TemplateSource};
pub use config::BatchConfig;
pub use error::{BatchError, Result};
