//! List command implementation

use std::path::Path;

use colored::Colorize;
use stack_core::{StackLibrary, StackSummary};

use crate::error::Result;

/// Run the list command
pub fn run_list(library_root: &Path, json: bool) -> Result<Vec<StackSummary>> {
    let library = StackLibrary::open(library_root)?;
    let stacks = library.list_stacks()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stacks)?);
        return Ok(stacks);
    }

    println!("{}", "Available Stacks".bold());
    println!();
    if stacks.is_empty() {
        println!("   No manifests found in {}", library.store().stacks_dir().as_str().dimmed());
    }
    for stack in &stacks {
        match &stack.name {
            Some(name) => println!("  {:<24} {}", stack.file.green(), name),
            None => println!("  {:<24} {}", stack.file.red(), "(invalid manifest)".dimmed()),
        }
    }
    println!();
    println!(
        "{} {} stack(s). Use {} to build one.",
        "Total:".dimmed(),
        stacks.len(),
        "stack build <file>".cyan()
    );

    Ok(stacks)
}
