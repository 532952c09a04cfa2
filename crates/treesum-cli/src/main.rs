//! treesum CLI
//!
//! Verifies directory trees against checksum databases and builds patch
//! archives from the difference between two databases.

mod cli;
mod commands;
mod error;

use std::io::IsTerminal;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Verify(args) => commands::run_verify(cli.config.as_deref(), &args),
        Commands::Diff(args) => commands::run_diff(cli.config.as_deref(), &args),
        Commands::Inspect { patch_file, json } => commands::run_inspect(&patch_file, json),
    }
}

/// Route library events to stderr.
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(verbose)
        .without_time()
        .compact();

    // An already-installed subscriber is kept
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();

    if verbose {
        tracing::debug!("Verbose mode enabled");
    }
}
