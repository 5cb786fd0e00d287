mod cli;

use clap::Parser;
use cli::Cli;
use std::error::Error as _;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wsdlbatch_core::{BatchConfig, BatchError, BatchRun, CommandCompiler, Result, RunRequest};

fn main() -> ExitCode {
    // Set RUST_LOG=debug for debug output, RUST_LOG=warn to keep only problems
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Beginning run of multiple calls to the WSDL compiler");

    // Wrong argument count exits here with status 2.
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            if e.shows_usage() {
                println!("{}", cli::USAGE);
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    cli.check_keywords()?;

    let config = BatchConfig::load()?;
    let request = RunRequest::new(&cli.input_dir, &cli.output_dir, &config);
    debug!("Run request: {:?}", request);

    let compiler =
        CommandCompiler::new(&config.compiler).with_args(config.compiler_args.iter().cloned());
    info!("Using compiler {}", compiler.program().display());

    let report = BatchRun::new(request, config).run(&compiler)?;

    if !report.cleanup_failures.is_empty() {
        info!(
            "{} stale artifact(s) could not be deleted beforehand",
            report.cleanup_failures.len()
        );
    }
    info!(
        "Finished: {} file(s) compiled, {} stale artifact(s) replaced",
        report.compiled.len(),
        report.removed.len()
    );
    Ok(())
}

fn report_error(err: &BatchError) {
    error!("###  {}", err);
    let mut cause = err.source();
    while let Some(inner) = cause {
        error!("     caused by: {}", inner);
        cause = inner.source();
    }
}
