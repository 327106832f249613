//! Library-wide validation
//!
//! Checks a module library without building anything: directory layout,
//! that every module and manifest parses, that manifests declare the
//! required fields and only known categories, and that every module
//! reference resolves.

use serde::Serialize;
use stack_fs::{DocumentFormat, LibraryPath, NormalizedPath, load_document};
use std::fs;

use crate::collect::type_name;
use crate::manifest::{KNOWN_CATEGORIES, is_known_category};
use crate::{Manifest, Result, StackLibrary};

/// Outcome of [`validate_library`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub checked_modules: usize,
    pub checked_manifests: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate the library rooted at `root`.
pub fn validate_library(root: impl Into<NormalizedPath>) -> Result<ValidationReport> {
    let library = StackLibrary::open(root)?;
    let mut report = ValidationReport::default();

    check_layout(&library, &mut report);
    check_modules(&library, &mut report)?;
    check_manifests(&library, &mut report)?;

    tracing::debug!(
        modules = report.checked_modules,
        manifests = report.checked_manifests,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "Validation finished"
    );
    Ok(report)
}

fn check_layout(library: &StackLibrary, report: &mut ValidationReport) {
    for dir in LibraryPath::REQUIRED {
        if !library.root().join(dir.as_str()).is_dir() {
            report
                .errors
                .push(format!("Required directory missing: {dir}"));
        }
    }
}

fn check_modules(library: &StackLibrary, report: &mut ValidationReport) -> Result<()> {
    for category in KNOWN_CATEGORIES {
        let dir = library.root().join(category);
        if !dir.is_dir() {
            continue;
        }
        for path in files_in(&dir)? {
            if DocumentFormat::detect(&path).is_none() {
                tracing::debug!(%path, "Skipping non-document file");
                continue;
            }
            report.checked_modules += 1;
            match load_document(&path) {
                Ok(document) if !document.is_object() => report.errors.push(format!(
                    "Invalid module {category}/{}: module must be a mapping, found {}",
                    display_name(&path),
                    type_name(&document)
                )),
                Ok(_) => {}
                Err(e) => report
                    .errors
                    .push(format!("Invalid module {category}/{}: {e}", display_name(&path))),
            }
        }
    }
    Ok(())
}

fn check_manifests(library: &StackLibrary, report: &mut ValidationReport) -> Result<()> {
    for path in library.manifest_files()? {
        report.checked_manifests += 1;
        let file = display_name(&path);

        let manifest = match Manifest::load_unnamed(&path) {
            Ok(manifest) => manifest,
            Err(e) => {
                report.errors.push(format!("{file}: {e}"));
                continue;
            }
        };

        if manifest.name.is_empty() {
            report.warnings.push(format!("{file}: Missing 'name' field"));
        }

        for category in manifest.unknown_categories() {
            report
                .warnings
                .push(format!("{file}: Unknown module category '{category}'"));
        }

        for reference in manifest.references() {
            if !is_known_category(&reference.category) {
                continue;
            }
            let module = library
                .store()
                .module_path(&reference.category, &reference.filename);
            if !module.is_file() {
                report
                    .errors
                    .push(format!("{file}: Module not found: {reference}"));
            }
        }
    }
    Ok(())
}

fn files_in(dir: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
    let entries =
        fs::read_dir(dir.to_native()).map_err(|e| stack_fs::Error::io(dir.to_native(), e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| stack_fs::Error::io(dir.to_native(), e))?;
        let path = NormalizedPath::new(entry.path());
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    Ok(files)
}

fn display_name(path: &NormalizedPath) -> &str {
    path.file_name().unwrap_or(path.as_str())
}
