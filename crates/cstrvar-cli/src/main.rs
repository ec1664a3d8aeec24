//! cstrvar - Turn a file into a C string variable
//!
//! Reads text on stdin and writes a `const char <name>[]` declaration holding
//! it to stdout, ready to be compiled into a program.
//!
//! ```text
//! cstrvar template_html <template.html >template_html.c
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use cstrvar_core::{emit, EmitStats, Error};
use std::fs::File;
use std::io::{self, BufRead, BufReader, LineWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

/// Turn a file into a C string variable
#[derive(Parser, Debug)]
#[command(name = "cstrvar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Name of the generated variable (empty when omitted)
    ///
    /// Taken verbatim. A name that starts with `-` and spells only known
    /// flags (such as `-v`) must follow `--`.
    #[arg(allow_hyphen_values = true)]
    name: Option<String>,

    /// Read from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // stdout carries the generated source
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    if let Err(err) = run(&cli) {
        if is_broken_pipe(&err) {
            // the consumer stopped reading; nothing left to report to it
            debug!("Output closed early: {:#}", err);
            std::process::exit(1);
        }
        return Err(err);
    }
    Ok(())
}

/// Returns true if `err` was caused by the output side going away
fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.downcast_ref::<Error>().is_some_and(Error::is_broken_pipe)
}

/// Connect the selected streams and emit the declaration
fn run(cli: &Cli) -> Result<EmitStats> {
    let reader = open_input(cli)?;
    let writer = open_output(cli)?;

    debug!("Declaring '{}'", cli.name());
    let stats = emit(reader, writer, cli.name())
        .with_context(|| format!("Failed to generate declaration for '{}'", cli.name()))?;

    info!(
        "Wrote {} lines ({} bytes) as '{}'",
        stats.lines,
        stats.bytes,
        cli.name()
    );
    Ok(stats)
}

fn open_input(cli: &Cli) -> Result<Box<dyn BufRead>> {
    match &cli.input {
        Some(path) => {
            debug!("Reading {}", path.display());
            let file = File::open(path).map_err(|e| Error::file_read(path, e))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn open_output(cli: &Cli) -> Result<Box<dyn Write>> {
    match &cli.output {
        Some(path) => {
            debug!("Writing {}", path.display());
            let file = File::create(path).map_err(|e| Error::file_write(path, e))?;
            Ok(Box::new(LineWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}
