//! End-to-end tests for the batch pipeline.
//!
//! These tests verify that:
//! 1. Only matching files are compiled, in name order
//! 2. Stale artifacts are gone before the first compile call
//! 3. A compile failure stops the batch
//! 4. Validation failures leave the filesystem untouched

use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wsdlbatch_core::batch::{BatchRun, RunRequest};
use wsdlbatch_core::compiler::{CompileError, CompileJob, CompileListener, Compiler, TemplateSource};
use wsdlbatch_core::config::{BatchConfig, SuffixPair};
use wsdlbatch_core::BatchError;

/// Fake compiler that records each call and writes the artifact.
#[derive(Default)]
struct FakeCompiler {
    calls: RefCell<Vec<(String, String)>>,
    /// Whether any other mapped artifact existed when each call was made.
    saw_stale: RefCell<Vec<bool>>,
    watched: Vec<PathBuf>,
    fail_on: Option<String>,
    template_counts: RefCell<Vec<usize>>,
}

impl Compiler for FakeCompiler {
    fn compile(
        &self,
        job: &CompileJob<'_>,
        templates: &TemplateSource,
        _listener: Option<&dyn CompileListener>,
    ) -> Result<(), CompileError> {
        let input = file_name(job.input);
        let output = file_name(job.output);
        self.saw_stale.borrow_mut().push(
            self.watched
                .iter()
                .any(|p| p.exists() && fs::read_to_string(p).ok().as_deref() == Some("stale")),
        );
        self.template_counts.borrow_mut().push(templates.len());
        self.calls.borrow_mut().push((input.clone(), output));

        if self.fail_on.as_deref() == Some(input.as_str()) {
            return Err(CompileError::Rejected(format!("{input}: undefined port type")));
        }
        fs::write(job.output, "fresh").map_err(|source| CompileError::Spawn {
            program: "fake".to_string(),
            source,
        })?;
        Ok(())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().to_string()
}

struct Workspace {
    _root: TempDir,
    input: PathBuf,
    output: PathBuf,
    templates: PathBuf,
}

fn workspace(inputs: &[&str]) -> Workspace {
    let root = TempDir::new().expect("Failed to create temp dir");
    let input = root.path().join("wsdl");
    let output = root.path().join("jars");
    let templates = root.path().join("templates");
    fs::create_dir(&input).unwrap();
    fs::create_dir(&output).unwrap();
    fs::create_dir(&templates).unwrap();
    fs::write(templates.join("stub.st"), "$name$").unwrap();
    for name in inputs {
        fs::write(input.join(name), "<definitions/>").unwrap();
    }
    Workspace {
        _root: root,
        input,
        output,
        templates,
    }
}

fn def_config(ws: &Workspace) -> BatchConfig {
    BatchConfig::builder()
        .suffixes(SuffixPair::new(".def", ".out.pkg").unwrap())
        .template_dir(&ws.templates)
        .build()
}

fn calls(compiler: &FakeCompiler) -> Vec<(String, String)> {
    compiler.calls.borrow().clone()
}

fn pair(input: &str, output: &str) -> (String, String) {
    (input.to_string(), output.to_string())
}

#[test]
fn test_compiles_matching_files_in_name_order() {
    let ws = workspace(&["B.def", "notes.txt", "A.def"]);
    let config = def_config(&ws);
    let compiler = FakeCompiler::default();

    let report = BatchRun::new(RunRequest::new(&ws.input, &ws.output, &config), config)
        .run(&compiler)
        .expect("batch should succeed");

    assert_eq!(
        calls(&compiler),
        vec![pair("A.def", "A.out.pkg"), pair("B.def", "B.out.pkg")]
    );
    assert_eq!(report.compiled.len(), 2);
    assert!(ws.output.join("A.out.pkg").exists());
    assert!(ws.output.join("B.out.pkg").exists());
    assert_eq!(fs::read_to_string(ws.input.join("notes.txt")).unwrap(), "<definitions/>");
    assert!(!ws.output.join("notes.txt").exists());
}

#[test]
fn test_template_source_is_shared_by_every_call() {
    let ws = workspace(&["a.def", "b.def", "c.def"]);
    let config = def_config(&ws);
    let compiler = FakeCompiler::default();

    BatchRun::new(RunRequest::new(&ws.input, &ws.output, &config), config)
        .run(&compiler)
        .unwrap();

    assert_eq!(*compiler.template_counts.borrow(), vec![1, 1, 1]);
}

#[test]
fn test_stale_artifacts_removed_before_first_compile() {
    let ws = workspace(&["a.def", "b.def"]);
    let stale_a = ws.output.join("a.out.pkg");
    let stale_b = ws.output.join("b.out.pkg");
    let unrelated = ws.output.join("keep.jar");
    fs::write(&stale_a, "stale").unwrap();
    fs::write(&stale_b, "stale").unwrap();
    fs::write(&unrelated, "stale").unwrap();
    let config = def_config(&ws);
    let output_dir = fs::canonicalize(&ws.output).unwrap();
    let compiler = FakeCompiler {
        watched: vec![output_dir.join("a.out.pkg"), output_dir.join("b.out.pkg")],
        ..Default::default()
    };

    let report = BatchRun::new(RunRequest::new(&ws.input, &ws.output, &config), config)
        .run(&compiler)
        .unwrap();

    assert_eq!(*compiler.saw_stale.borrow(), vec![false, false]);
    assert_eq!(report.removed.len(), 2);
    assert!(report.cleanup_failures.is_empty());
    assert_eq!(fs::read_to_string(&stale_b).unwrap(), "fresh");
    assert_eq!(fs::read_to_string(&unrelated).unwrap(), "stale");
}

#[test]
fn test_failure_stops_remaining_inputs() {
    let ws = workspace(&["a.def", "b.def", "c.def", "d.def"]);
    let config = def_config(&ws);
    let compiler = FakeCompiler {
        fail_on: Some("b.def".to_string()),
        ..Default::default()
    };

    let err = BatchRun::new(RunRequest::new(&ws.input, &ws.output, &config), config)
        .run(&compiler)
        .unwrap_err();

    assert!(matches!(err, BatchError::Compilation { .. }), "{err}");
    assert_eq!(err.exit_code(), 1);
    assert_eq!(
        calls(&compiler),
        vec![pair("a.def", "a.out.pkg"), pair("b.def", "b.out.pkg")]
    );
    assert!(ws.output.join("a.out.pkg").exists());
    assert!(!ws.output.join("c.out.pkg").exists());
}

#[test]
fn test_no_inputs_leaves_output_untouched() {
    let ws = workspace(&["readme.txt"]);
    let stale = ws.output.join("readme.out.pkg");
    fs::write(&stale, "stale").unwrap();
    let config = def_config(&ws);
    let compiler = FakeCompiler::default();

    let err = BatchRun::new(RunRequest::new(&ws.input, &ws.output, &config), config)
        .run(&compiler)
        .unwrap_err();

    assert!(matches!(err, BatchError::NoInputFiles { .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(calls(&compiler).is_empty());
    assert_eq!(fs::read_to_string(&stale).unwrap(), "stale");
}

#[test]
fn test_missing_output_dir_fails_before_cleanup() {
    let ws = workspace(&["a.def"]);
    let config = def_config(&ws);
    let compiler = FakeCompiler::default();

    let err = BatchRun::new(
        RunRequest::new(&ws.input, ws.output.join("missing"), &config),
        config,
    )
    .run(&compiler)
    .unwrap_err();

    match err {
        BatchError::InvalidDirectory { role, .. } => assert_eq!(role, "jardir"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(calls(&compiler).is_empty());
}

#[test]
fn test_loose_filter_aborts_before_cleanup() {
    let ws = workspace(&["a.def", "b.DEF"]);
    let stale = ws.output.join("a.out.pkg");
    fs::write(&stale, "stale").unwrap();
    let config = def_config(&ws);
    let compiler = FakeCompiler::default();
    let loose = |name: &str| name.to_ascii_lowercase().ends_with(".def");

    let err = BatchRun::new(RunRequest::new(&ws.input, &ws.output, &config), config)
        .run_with_filter(&compiler, &loose)
        .unwrap_err();

    assert!(matches!(err, BatchError::FilterInvariantViolation { .. }));
    assert!(stale.exists());
    assert!(calls(&compiler).is_empty());
}

#[test]
fn test_missing_template_dir_fails_without_compiling() {
    let ws = workspace(&["a.def"]);
    let config = BatchConfig::builder()
        .suffixes(SuffixPair::new(".def", ".out.pkg").unwrap())
        .template_dir(ws.templates.join("absent"))
        .build();
    let compiler = FakeCompiler::default();

    let err = BatchRun::new(RunRequest::new(&ws.input, &ws.output, &config), config)
        .run(&compiler)
        .unwrap_err();

    assert!(matches!(err, BatchError::Template(_)));
    assert!(calls(&compiler).is_empty());
}

#[test]
fn test_package_prefix_and_standalone_reach_the_compiler() {
    #[derive(Default)]
    struct Capture(RefCell<Vec<(Option<String>, bool, bool)>>);

    impl Compiler for Capture {
        fn compile(
            &self,
            job: &CompileJob<'_>,
            _templates: &TemplateSource,
            listener: Option<&dyn CompileListener>,
        ) -> Result<(), CompileError> {
            assert!(listener.is_none());
            self.0.borrow_mut().push((
                job.package_prefix.map(str::to_string),
                job.standalone,
                job.suppress_prompt,
            ));
            Ok(())
        }
    }

    let ws = workspace(&["a.wsdl"]);
    let config = BatchConfig::builder()
        .template_dir(&ws.templates)
        .package_prefix("com.acme.ws")
        .standalone(true)
        .build();
    let compiler = Capture::default();

    BatchRun::new(RunRequest::new(&ws.input, &ws.output, &config), config)
        .run(&compiler)
        .unwrap();

    assert_eq!(
        *compiler.0.borrow(),
        vec![(Some("com.acme.ws".to_string()), true, true)]
    );
}
