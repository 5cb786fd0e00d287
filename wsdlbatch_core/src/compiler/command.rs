//! Runs an external compiler program once per WSDL file.

use super::{CompileError, CompileJob, CompileListener, Compiler, TemplateSource};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, trace};

/// A [`Compiler`] backed by an external program.
///
/// The program is invoked as
/// `<program> [args..] [--package-prefix P] [--standalone] --templates DIR
/// --delimiters SS [--no-prompt] <input> <output>`.
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandCompiler {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Adds arguments placed ahead of the generated ones.
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Builds the argument list for one job.
    pub fn command_args(&self, job: &CompileJob<'_>, templates: &TemplateSource) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();

        if let Some(prefix) = job.package_prefix {
            args.push("--package-prefix".into());
            args.push(prefix.into());
        }
        if job.standalone {
            args.push("--standalone".into());
        }
        let (start, stop) = templates.delimiters();
        args.push("--templates".into());
        args.push(templates.location().into());
        args.push("--delimiters".into());
        args.push(format!("{start}{stop}").into());
        if job.suppress_prompt {
            args.push("--no-prompt".into());
        }
        args.push(job.input.into());
        args.push(job.output.into());
        args
    }
}

impl Compiler for CommandCompiler {
    fn compile(
        &self,
        job: &CompileJob<'_>,
        templates: &TemplateSource,
        listener: Option<&dyn CompileListener>,
    ) -> Result<(), CompileError> {
        let program = self.program.display().to_string();
        let args = self.command_args(job, templates);
        trace!("Spawning {} {:?}", program, args);

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| CompileError::Spawn {
                program: program.clone(),
                source,
            })?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            match listener {
                Some(listener) => listener.on_message(line),
                None => debug!("[{}] {}", program, line),
            }
        }

        if !output.status.success() {
            return Err(CompileError::Failed {
                program,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
