//! Golden-file tests using test-fixtures/
//!
//! Builds the stacks of the sample library in test-fixtures/library and
//! compares the written artifacts against test-fixtures/expected/.

use pretty_assertions::assert_eq;
use stack_core::{Bindings, StackLibrary, validate_library};
use stack_fs::NormalizedPath;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

/// Normalize line endings to LF for cross-platform comparison.
fn normalize_line_endings(s: &str) -> String {
    s.replace("\r\n", "\n")
}

/// Path to the test-fixtures directory (relative to the workspace root).
fn fixtures_dir() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // tests/integration -> ../../test-fixtures
    manifest_dir.join("../../test-fixtures")
}

fn library() -> StackLibrary {
    StackLibrary::open(fixtures_dir().join("library")).expect("fixture library should open")
}

fn load_expected(stack: &str, file: &str) -> String {
    let path = fixtures_dir().join("expected").join(stack).join(file);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read expected output at {}: {}", path.display(), e))
}

// ==========================================================================
// Fixture validity
// ==========================================================================

#[test]
fn test_fixture_library_validates_cleanly() {
    let report = validate_library(fixtures_dir().join("library")).unwrap();

    assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
    assert!(report.warnings.is_empty(), "unexpected warnings: {:?}", report.warnings);
    assert_eq!(report.checked_manifests, 3);
    assert!(report.checked_modules >= 11);
}

#[test]
fn test_fixture_library_lists_every_stack() {
    let stacks = library().list_stacks().unwrap();
    let names: Vec<_> = stacks.iter().map(|s| s.name.clone().unwrap_or_default()).collect();

    assert_eq!(names, vec!["Minimal", "Python CUDA", "Python Development"]);
}

// ==========================================================================
// Golden output
// ==========================================================================

#[test]
fn test_python_dev_matches_expected_artifacts() {
    let out = tempdir().unwrap();
    let out_dir = NormalizedPath::new(out.path());

    let output = library()
        .build(&NormalizedPath::new("python-dev.yaml"), &Bindings::new())
        .unwrap();
    assert!(output.warnings.is_empty());
    assert_eq!(output.modules_loaded, 10);

    let written = output.write(&out_dir).unwrap();
    assert_eq!(written.len(), 3);

    for file in ["settings.json", "extensions.json", "tasks.json"] {
        let actual = fs::read_to_string(out.path().join(file)).unwrap();
        assert_eq!(
            normalize_line_endings(&actual),
            normalize_line_endings(&load_expected("python-dev", file)),
            "{file} differs from the golden output"
        );
    }
}

#[test]
fn test_unbound_placeholder_survives_build() {
    let output = library()
        .build(&NormalizedPath::new("python-cuda.yaml"), &Bindings::new())
        .unwrap();

    let settings = &output.settings.as_ref().unwrap().document;
    assert_eq!(settings["python.defaultInterpreterPath"], "/opt/venv/bin/python");
    assert_eq!(
        settings["terminal.integrated.env.linux"]["CUDA_HOME"],
        "{{CUDA_HOME}}"
    );
    assert_eq!(output.unresolved_placeholders().unwrap(), vec!["CUDA_HOME".to_string()]);
    assert!(output.extensions.is_none());
    assert!(output.tasks.is_none());
}

#[test]
fn test_override_binds_placeholder_left_by_manifest() {
    let overrides: Bindings = [("CUDA_HOME".to_string(), "/usr/local/cuda".to_string())]
        .into_iter()
        .collect();

    let output = library()
        .build(&NormalizedPath::new("python-cuda.yaml"), &overrides)
        .unwrap();

    let settings = &output.settings.as_ref().unwrap().document;
    assert_eq!(
        settings["terminal.integrated.env.linux"]["CUDA_HOME"],
        "/usr/local/cuda"
    );
    assert!(output.unresolved_placeholders().unwrap().is_empty());
}

#[test]
fn test_yml_extension_is_resolved_from_stacks() {
    let output = library()
        .build(&NormalizedPath::new("minimal.yml"), &Bindings::new())
        .unwrap();

    assert_eq!(output.name, "Minimal");
    assert_eq!(output.artifacts().count(), 1);
    assert!(output.warnings.is_empty());
}
