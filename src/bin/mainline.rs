//! CLI front end (spec.md §4.7): replay a PGN file's mainline and print
//! the final board.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use mainline::session::Session;

/// Replay a PGN file's mainline and print the resulting board.
#[derive(Parser, Debug)]
#[command(name = "mainline", version, about = "PGN mainline replay engine")]
struct Args {
    /// Path to the PGN file to replay.
    path: PathBuf,
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn run(args: Args) -> Result<String> {
    let file = File::open(&args.path)
        .with_context(|| format!("failed to open {}", args.path.display()))?;
    let board = Session::new(BufReader::new(file))
        .run()
        .with_context(|| format!("failed to replay {}", args.path.display()))?;
    Ok(board.to_string())
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();
    match run(args) {
        Ok(rendered) => {
            print!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "replay failed");
            ExitCode::FAILURE
        }
    }
}
