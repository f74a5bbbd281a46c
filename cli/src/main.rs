#![deny(missing_docs)]

//! # Structgen CLI
//!
//! Compiles a morphe schema tree into Go struct packages.
//!
//! Invoked with a single JSON argument:
//! `{"inputPath": ..., "outputPath": ..., "config": {...}, "verbose": false}`.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, CliResult};
use crate::invocation::Invocation;

mod error;
mod invocation;
mod run;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Morphe to Go struct compiler")]
struct Cli {
    /// JSON object with inputPath, outputPath, config and optional verbose.
    invocation: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match start(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn start(cli: &Cli) -> CliResult<()> {
    let raw = cli.invocation.as_deref().ok_or(CliError::MissingInvocation)?;
    let invocation = Invocation::parse(raw)?;
    init_logging(invocation.verbose);

    run::execute(&invocation)?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A second init (tests) is harmless; keep the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
