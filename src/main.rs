mod article;
mod assembler;
mod build;
mod config;
mod diagnostics;
mod error;
mod patterns;
mod registry;
mod resolver;
mod scanner;
mod splitter;
mod types;
mod validator;

use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "crossdoc",
    version,
    about = "Assemble a cross-linked markdown document from article fragments"
)]
struct Cli {
    /// Validate the corpus without emitting the document
    #[arg(long)]
    check: bool,
    /// Write the document to this file instead of stdout
    #[arg(short, long, value_name = "FILE", conflicts_with = "check")]
    output: Option<PathBuf>,
    /// Corpus root: one folder per chapter
    root: PathBuf,
    /// Log progress at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    return match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
    };
}

/// Logs go to stderr so stdout carries only the document.
fn init_tracing(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Build the document and deliver it where the CLI asked.
///
/// # Errors
///
/// Returns any build error, or `Error::Io` if the output cannot be written.
fn run(cli: &Cli) -> Result<(), error::Error> {
    let document = build::run(&cli.root)?;

    if cli.check {
        tracing::info!(root = %cli.root.display(), "corpus is valid");
        return Ok(());
    }

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &document)?;
            tracing::info!(path = %path.display(), "wrote document");
        },
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.flush()?;
        },
    }

    return Ok(());
}
