//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand};
use stack_fs::constants::DEFAULT_OUTPUT_DIR;
use std::path::PathBuf;

/// Stack builder - Assemble configuration bundles from a module library
#[derive(Parser, Debug)]
#[command(name = "stack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Location of the module library
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct LibraryArgs {
    /// Root directory of the module library (default: current directory)
    #[arg(
        short = 'c',
        long = "library",
        alias = "config-root",
        env = "STACK_LIBRARY",
        value_name = "DIR"
    )]
    pub library: Option<PathBuf>,
}

impl LibraryArgs {
    /// The library root, falling back to the current directory.
    pub fn root(&self) -> std::io::Result<PathBuf> {
        match &self.library {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir(),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Build configuration artifacts from a stack manifest
    ///
    /// A relative manifest path that does not exist is looked up in the
    /// library's stacks/ directory.
    ///
    /// Examples:
    ///   stack build stacks/python-dev.yaml
    ///   stack build python-dev.yaml -o ../project/.vscode
    ///   stack build python-dev.yaml -v VENV=/opt/venv -v PORT=8080
    Build {
        /// Path to the stack manifest (YAML)
        manifest: PathBuf,

        /// Output directory for the artifacts
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,

        /// Override a manifest variable (repeatable)
        #[arg(short = 'v', long = "variable", value_name = "KEY=VALUE")]
        variables: Vec<String>,

        #[command(flatten)]
        library: LibraryArgs,

        /// Build and report without writing any file
        #[arg(long)]
        dry_run: bool,

        /// Output the build report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate every module and manifest in the library
    Validate {
        #[command(flatten)]
        library: LibraryArgs,

        /// Output the validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the stacks available in the library
    List {
        #[command(flatten)]
        library: LibraryArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_args() {
        let cli = Cli::parse_from(["stack"]);
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_build_defaults() {
        let cli = Cli::parse_from(["stack", "build", "dev.yaml"]);
        match cli.command {
            Some(Commands::Build {
                manifest,
                output,
                variables,
                dry_run,
                json,
                ..
            }) => {
                assert_eq!(manifest, PathBuf::from("dev.yaml"));
                assert_eq!(output, PathBuf::from(".vscode"));
                assert!(variables.is_empty());
                assert!(!dry_run);
                assert!(!json);
            }
            other => panic!("Expected Build command, got {other:?}"),
        }
    }

    #[test]
    fn parse_build_with_overrides_and_library() {
        let cli = Cli::parse_from([
            "stack",
            "build",
            "dev.yaml",
            "-o",
            "out",
            "-v",
            "A=1",
            "--variable",
            "B=2",
            "-c",
            "/lib",
            "--verbose",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Build {
                output,
                variables,
                library,
                ..
            }) => {
                assert_eq!(output, PathBuf::from("out"));
                assert_eq!(variables, vec!["A=1", "B=2"]);
                assert_eq!(library.library, Some(PathBuf::from("/lib")));
            }
            other => panic!("Expected Build command, got {other:?}"),
        }
    }

    #[test]
    fn parse_config_root_alias() {
        let cli = Cli::parse_from(["stack", "validate", "--config-root", "/lib"]);
        match cli.command {
            Some(Commands::Validate { library, .. }) => {
                assert_eq!(library.library, Some(PathBuf::from("/lib")));
            }
            other => panic!("Expected Validate command, got {other:?}"),
        }
    }
}
