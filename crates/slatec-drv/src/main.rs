//! The `slatec` binary.
//!
//! Thin CLI over [`slatec_drv::compile`]: parse arguments, set up logging,
//! run the front-end once, print the banner, map the error flag to the
//! exit code.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use slatec_drv::{compile, CompileOptions};

/// Compiler front-end for the Slate teaching language.
///
/// Scans, parses and type-checks one source file, writing token,
/// symbol-table and parse-tree reports plus one error report per phase.
#[derive(Parser, Debug)]
#[command(name = "slatec")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compiler front-end for the Slate teaching language", long_about = None)]
struct Cli {
    /// Source file to compile
    input: PathBuf,

    /// Directory for the token, symbol-table and parse-tree reports
    #[arg(short, long, default_value = "output", env = "SLATEC_OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Directory for the error reports
    #[arg(long, default_value = "errors", env = "SLATEC_ERRORS_DIR")]
    errors_dir: PathBuf,

    /// Scanner read size in bytes
    #[arg(long, default_value_t = slatec_lex::window::DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Keep at most this many source lines of tokens for the token report
    #[arg(long)]
    keep_lines: Option<usize>,

    /// Suppress the compilation banner
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let options = CompileOptions {
        input: cli.input,
        output_dir: cli.output_dir,
        errors_dir: cli.errors_dir,
        chunk_size: cli.chunk_size,
        retention: cli.keep_lines,
    };

    match compile(&options) {
        Ok(outcome) => {
            if !cli.quiet {
                print!("{}", outcome.banner);
            }
            if outcome.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(err) => {
            eprintln!("slatec: {err:#}");
            ExitCode::from(2)
        }
    }
}
