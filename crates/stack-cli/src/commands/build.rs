//! Build command implementation
//!
//! Loads the manifest, composes the artifacts and writes them to the
//! output directory. Missing modules are reported as warnings; anything
//! fatal is returned as an error before a file is written.

use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use stack_core::{BuildWarning, StackLibrary, parse_bindings};
use stack_fs::NormalizedPath;

use crate::error::Result;

/// Flags that change how a build is carried out and reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub dry_run: bool,
    pub json: bool,
}

/// Summary of a finished build, printed as text or JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildReport {
    pub stack: String,
    pub output_dir: String,
    pub dry_run: bool,
    pub modules_loaded: usize,
    pub artifacts: Vec<String>,
    pub warnings: Vec<BuildWarning>,
    pub unresolved: Vec<String>,
}

/// Run the build command
pub fn run_build(
    library_root: &Path,
    manifest: &Path,
    output: &Path,
    variables: &[String],
    options: BuildOptions,
) -> Result<BuildReport> {
    let overrides = parse_bindings(variables)?;
    let library = StackLibrary::open(library_root)?;
    let manifest = NormalizedPath::new(manifest);
    let out_dir = NormalizedPath::new(output);

    if !options.json {
        println!(
            "{} Building {} from {}",
            "=>".blue().bold(),
            manifest.as_str().cyan(),
            library.root().as_str().dimmed()
        );
    }

    let output = library.build(&manifest, &overrides)?;

    let artifacts = if options.dry_run {
        output
            .artifacts()
            .map(|a| out_dir.join(a.file_name()))
            .collect::<Vec<_>>()
    } else {
        output.write(&out_dir)?
    };

    let report = BuildReport {
        stack: output.name.clone(),
        output_dir: out_dir.as_str().to_string(),
        dry_run: options.dry_run,
        modules_loaded: output.modules_loaded,
        artifacts: artifacts.iter().map(|p| p.as_str().to_string()).collect(),
        warnings: output.warnings.clone(),
        unresolved: output.unresolved_placeholders()?,
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(report)
}

fn print_report(report: &BuildReport) {
    let verb = if report.dry_run { "Would write" } else { "Wrote" };

    if report.artifacts.is_empty() {
        println!("{} Stack declares no modules. Nothing to write.", "OK".green().bold());
    } else {
        println!(
            "{} {} ({} modules loaded):",
            "OK".green().bold(),
            report.stack.bold(),
            report.modules_loaded
        );
        for path in &report.artifacts {
            println!("   {} {} {}", "+".green(), verb, path.cyan());
        }
    }

    if !report.warnings.is_empty() {
        println!();
        println!("{} {} warning(s):", "WARNING".yellow().bold(), report.warnings.len());
        for warning in &report.warnings {
            println!("   {} {}", "-".yellow(), warning);
        }
    }

    if !report.unresolved.is_empty() {
        println!();
        println!(
            "{} Unresolved placeholders left in output: {}",
            "NOTE".cyan().bold(),
            report
                .unresolved
                .iter()
                .map(|name| format!("{{{{{name}}}}}"))
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("   Pass {} to bind them.", "-v NAME=VALUE".cyan());
    }
}
