//! Validate command implementation

use std::path::Path;

use colored::Colorize;
use stack_core::{ValidationReport, validate_library};

use crate::error::{CliError, Result};

/// Run the validate command
///
/// Prints every error and warning, and fails when any error was found.
pub fn run_validate(library_root: &Path, json: bool) -> Result<ValidationReport> {
    let report = validate_library(library_root)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(library_root, &report);
    }

    if report.is_valid() {
        Ok(report)
    } else {
        Err(CliError::user(format!(
            "Validation failed with {} error(s)",
            report.errors.len()
        )))
    }
}

fn print_report(root: &Path, report: &ValidationReport) {
    println!(
        "{} Validating library at {}",
        "=>".blue().bold(),
        root.display().to_string().cyan()
    );
    println!(
        "   Checked {} module(s) and {} manifest(s)",
        report.checked_modules, report.checked_manifests
    );

    if !report.errors.is_empty() {
        println!();
        println!("{} {} error(s):", "ERROR".red().bold(), report.errors.len());
        for error in &report.errors {
            println!("   {} {}", "!".red(), error);
        }
    }

    if !report.warnings.is_empty() {
        println!();
        println!("{} {} warning(s):", "WARNING".yellow().bold(), report.warnings.len());
        for warning in &report.warnings {
            println!("   {} {}", "-".yellow(), warning);
        }
    }

    if report.is_valid() {
        println!();
        println!("{} Library is valid.", "OK".green().bold());
    }
}
