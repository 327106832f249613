//! Configuration stack builder CLI
//!
//! Builds editor configuration bundles from a module library and a stack
//! manifest, and checks the library for broken modules and references.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::BuildOptions;
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
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} Configuration stack builder", "stack".green().bold());
            println!();
            println!("Run {} for available commands.", "stack --help".cyan());
            Ok(())
        }
    }
}

/// Log to stderr so `--json` output on stdout stays parseable.
///
/// `--verbose` forces debug level; otherwise `RUST_LOG` decides and
/// logging is off by default.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"))
    };

    let initialized = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();

    if initialized.is_ok() && verbose {
        tracing::debug!("Verbose mode enabled");
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Build {
            manifest,
            output,
            variables,
            library,
            dry_run,
            json,
        } => {
            let root = library.root()?;
            commands::run_build(
                &root,
                &manifest,
                &output,
                &variables,
                BuildOptions { dry_run, json },
            )?;
            Ok(())
        }
        Commands::Validate { library, json } => {
            commands::run_validate(&library.root()?, json)?;
            Ok(())
        }
        Commands::List { library, json } => {
            commands::run_list(&library.root()?, json)?;
            Ok(())
        }
    }
}
