//! End-to-end build behaviour against temporary libraries
//!
//! Covers the composition properties that only show up across the whole
//! pipeline: fold order across categories, warning accounting for missing
//! modules, and the no-partial-output guarantee on fatal errors.

use pretty_assertions::assert_eq;
use serde_json::json;
use stack_core::{Bindings, BuildWarning, Error, StackLibrary, parse_bindings};
use stack_fs::NormalizedPath;
use stack_test_utils::TestLibrary;

fn build(lib: &TestLibrary, manifest: &str, overrides: &Bindings) -> stack_core::Result<stack_core::BuildOutput> {
    StackLibrary::open(lib.root())?.build(&NormalizedPath::new(manifest), overrides)
}

fn write(lib: &TestLibrary, manifest: &str, overrides: &Bindings) -> stack_core::Result<()> {
    let output = build(lib, manifest, overrides)?;
    output.write(&NormalizedPath::new(lib.output_dir()))?;
    Ok(())
}

#[test]
fn two_valid_settings_and_one_missing_yield_one_warning() {
    let lib = TestLibrary::new();
    lib.module("settings", "a.json", &json!({"a": 1, "shared": "a"}));
    lib.module("settings", "b.json", &json!({"b": 2, "shared": "b"}));
    lib.manifest(
        "s.yaml",
        "name: S\nmodules:\n  settings: [a.json, missing.json, b.json]\n",
    );

    let output = build(&lib, "s.yaml", &Bindings::new()).unwrap();

    assert_eq!(
        output.settings.as_ref().unwrap().document,
        json!({"a": 1, "shared": "b", "b": 2})
    );
    assert_eq!(output.warnings.len(), 1);
    match &output.warnings[0] {
        BuildWarning::MissingModule { category, filename, .. } => {
            assert_eq!(category, "settings");
            assert_eq!(filename, "missing.json");
        }
    }
}

#[test]
fn manifest_without_modules_writes_nothing() {
    let lib = TestLibrary::new();
    lib.module("core", "base.json", &json!({"a": 1}));
    lib.manifest("bad.yaml", "name: Bad\nvariables:\n  X: y\n");

    let err = write(&lib, "bad.yaml", &Bindings::new()).unwrap_err();

    assert!(matches!(err, Error::InvalidManifest { .. }), "got {err:?}");
    assert!(err.to_string().contains("modules"));
    lib.assert_file_not_exists("out");
}

#[test]
fn manifest_without_name_writes_nothing() {
    let lib = TestLibrary::new();
    lib.module("core", "base.json", &json!({"a": 1}));
    lib.manifest("anon.yaml", "modules:\n  core: [base.json]\n");

    let err = write(&lib, "anon.yaml", &Bindings::new()).unwrap_err();

    assert!(matches!(err, Error::InvalidManifest { .. }), "got {err:?}");
    assert!(err.to_string().contains("name"));
    lib.assert_file_not_exists("out");
}

#[test]
fn settings_module_that_is_not_a_mapping_keeps_earlier_settings_safe() {
    let lib = TestLibrary::new();
    lib.module("core", "base.json", &json!({"editor.tabSize": 4, "files.eol": "\n"}));
    lib.raw_module("settings", "oops.json", "null");
    lib.module("settings", "py.json", &json!({"python.x": 1}));
    lib.manifest(
        "s.yaml",
        "name: S\nmodules:\n  core: [base.json]\n  settings: [oops.json, py.json]\n",
    );

    let err = write(&lib, "s.yaml", &Bindings::new()).unwrap_err();

    assert!(matches!(err, Error::MalformedModule { .. }), "got {err:?}");
    assert!(err.to_string().contains("oops.json"), "got {err}");
    lib.assert_file_not_exists("out");
}

#[test]
fn malformed_task_module_suppresses_every_artifact() {
    let lib = TestLibrary::new();
    lib.module("core", "base.json", &json!({"a": 1}));
    lib.module("extensions", "e.json", &json!({"recommendations": ["x"]}));
    lib.raw_module("tasks", "t.json", "{\"tasks\": [");
    lib.manifest(
        "s.yaml",
        "name: S\nmodules:\n  core: [base.json]\n  extensions: [e.json]\n  tasks: [t.json]\n",
    );

    let err = write(&lib, "s.yaml", &Bindings::new()).unwrap_err();

    assert!(err.to_string().contains("t.json"), "got {err}");
    lib.assert_file_not_exists("out/settings.json");
    lib.assert_file_not_exists("out/extensions.json");
}

#[test]
fn categories_fold_in_manifest_order() {
    let lib = TestLibrary::new();
    lib.module("platforms", "mac.json", &json!({"shell": "zsh", "list": ["mac"]}));
    lib.module("core", "base.json", &json!({"shell": "sh", "list": ["core"]}));
    lib.manifest(
        "s.yaml",
        "name: S\nmodules:\n  platforms: [mac.json]\n  core: [base.json]\n",
    );

    let output = build(&lib, "s.yaml", &Bindings::new()).unwrap();

    assert_eq!(
        output.settings.unwrap().document,
        json!({"shell": "sh", "list": ["mac", "core"]})
    );
}

#[test]
fn tasks_concatenate_and_inputs_keep_first_id() {
    let lib = TestLibrary::new();
    lib.module(
        "tasks",
        "one.json",
        &json!({"tasks": [{"label": "run"}], "inputs": [{"id": "x", "v": 1}]}),
    );
    lib.module(
        "tasks",
        "two.json",
        &json!({"tasks": [{"label": "run"}], "inputs": [{"id": "x", "v": 2}, {"id": "y"}]}),
    );
    lib.manifest("s.yaml", "name: S\nmodules:\n  tasks: [one.json, two.json]\n");

    write(&lib, "s.yaml", &Bindings::new()).unwrap();

    assert_eq!(
        lib.read_json("out/tasks.json"),
        json!({
            "version": "2.0.0",
            "tasks": [{"label": "run"}, {"label": "run"}],
            "inputs": [{"id": "x", "v": 1}, {"id": "y"}]
        })
    );
    lib.assert_file_not_exists("out/settings.json");
}

#[test]
fn substitution_reaches_every_artifact() {
    let lib = TestLibrary::new();
    lib.module("core", "base.json", &json!({"root": "{{ROOT}}"}));
    lib.module("extensions", "e.json", &json!({"recommendations": ["{{PUBLISHER}}.tool"]}));
    lib.module("tasks", "t.json", &json!({"tasks": [{"cwd": "{{ROOT}}/src"}]}));
    lib.manifest(
        "s.yaml",
        "name: S\nvariables:\n  ROOT: /declared\n  PUBLISHER: acme\nmodules:\n  core: [base.json]\n  extensions: [e.json]\n  tasks: [t.json]\n",
    );

    let overrides = parse_bindings(&["ROOT=/work"]).unwrap();
    write(&lib, "s.yaml", &overrides).unwrap();

    assert_eq!(lib.read_json("out/settings.json"), json!({"root": "/work"}));
    assert_eq!(
        lib.read_json("out/extensions.json"),
        json!({"recommendations": ["acme.tool"]})
    );
    assert_eq!(lib.read_json("out/tasks.json")["tasks"][0]["cwd"], "/work/src");
}

#[test]
fn overrides_never_touch_the_manifest_on_disk() {
    let lib = TestLibrary::new();
    lib.module("core", "base.json", &json!({"p": "{{P}}"}));
    let manifest = lib.manifest("s.yaml", "name: S\nvariables:\n  P: one\nmodules:\n  core: [base.json]\n");
    let before = std::fs::read_to_string(&manifest).unwrap();

    let overrides = parse_bindings(&["P=two"]).unwrap();
    write(&lib, "s.yaml", &overrides).unwrap();

    assert_eq!(std::fs::read_to_string(&manifest).unwrap(), before);
    let stacks: Vec<_> = std::fs::read_dir(lib.root().join("stacks")).unwrap().collect();
    assert_eq!(stacks.len(), 1);
}

#[test]
fn missing_library_root_is_fatal() {
    let lib = TestLibrary::empty();
    let err = StackLibrary::open(lib.root().join("absent")).unwrap_err();
    assert!(matches!(err, Error::Fs(stack_fs::Error::LibraryNotFound { .. })));
}
