//! Command-line entry point (§6.4): reads a source file, runs it through the parser, engine,
//! and renderer, and prints the resulting truth tables to standard output.

use clap::Parser as ClapParser;
use robdd_tt::{render, ProgramError};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Builds ROBDDs from a small propositional-formula program and prints their truth tables.
#[derive(ClapParser, Debug)]
#[command(name = "robdd-tt", version, about)]
struct Cli {
    /// Path to the source program.
    input: PathBuf,

    /// Increase log verbosity; repeat for more detail (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug)]
enum CliError {
    Io { path: PathBuf, source: std::io::Error },
    Program(ProgramError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io { path, source } => write!(f, "error: could not read {}: {source}", path.display()),
            CliError::Program(err) => write!(f, "error: {err}"),
        }
    }
}

impl From<ProgramError> for CliError {
    fn from(err: ProgramError) -> CliError {
        CliError::Program(err)
    }
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let source = fs::read_to_string(&cli.input).map_err(|source| CliError::Io { path: cli.input.clone(), source })?;
    tracing::info!(path = %cli.input.display(), "parsing program");
    let (variables, tasks) = robdd_tt::parser::parse(&source)?;
    tracing::info!(variables = variables.len(), tasks = tasks.len(), "program parsed");
    let rendered = render::render_program(&variables, &tasks)?;
    Ok(rendered)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
