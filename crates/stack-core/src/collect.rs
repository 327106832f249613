//! List-aggregating collectors for the extensions and tasks categories

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

use crate::{Document, Error, ModuleReference, Result};

/// Version stamped on every tasks artifact.
pub const TASKS_VERSION: &str = "2.0.0";

/// A resolved module ready to be folded.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModule {
    pub reference: ModuleReference,
    /// Where the module was loaded from, used in error messages
    pub path: PathBuf,
    pub document: Document,
}

impl LoadedModule {
    pub fn new(reference: ModuleReference, path: impl Into<PathBuf>, document: Document) -> Self {
        Self {
            reference,
            path: path.into(),
            document,
        }
    }

    /// The list stored under `key`, or an empty slice if absent.
    fn list(&self, key: &str) -> Result<&[Value]> {
        match self.document.get(key) {
            None => Ok(Default::default()),
            Some(Value::Array(items)) => Ok(items.as_slice()),
            Some(other) => Err(Error::malformed_module(
                &self.path,
                format!("'{key}' must be a list, found {}", type_name(other)),
            )),
        }
    }
}

/// Collect `recommendations` across modules, first-seen order, no repeats.
pub fn collect_extensions(modules: &[LoadedModule]) -> Result<Vec<String>> {
    let mut recommendations = IndexSet::new();
    for module in modules {
        for item in module.list("recommendations")? {
            let id = item.as_str().ok_or_else(|| {
                Error::malformed_module(
                    &module.path,
                    format!("recommendation must be a string, found {}", type_name(item)),
                )
            })?;
            recommendations.insert(id.to_string());
        }
    }
    Ok(recommendations.into_iter().collect())
}

/// Combined tasks artifact
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TasksDocument {
    pub version: String,
    pub tasks: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<Value>,
}

impl TasksDocument {
    pub fn to_document(&self) -> Result<Document> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Concatenate `tasks` and collect `inputs` deduplicated by `id`.
///
/// Tasks are never deduplicated. For inputs the first record with a given
/// id wins and keeps its position.
pub fn collect_tasks(modules: &[LoadedModule]) -> Result<TasksDocument> {
    let mut tasks = Vec::new();
    let mut inputs: IndexMap<String, Value> = IndexMap::new();

    for module in modules {
        tasks.extend(module.list("tasks")?.iter().cloned());

        for input in module.list("inputs")? {
            let id = input.get("id").and_then(Value::as_str).ok_or_else(|| {
                Error::malformed_module(&module.path, "task input is missing a string 'id'")
            })?;
            if inputs.contains_key(id) {
                tracing::debug!(id, module = %module.reference, "Skipping duplicate task input");
                continue;
            }
            inputs.insert(id.to_string(), input.clone());
        }
    }

    Ok(TasksDocument {
        version: TASKS_VERSION.to_string(),
        tasks,
        inputs: inputs.into_values().collect(),
    })
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn module(category: &str, file: &str, document: Value) -> LoadedModule {
        LoadedModule::new(
            ModuleReference::new(category, file),
            format!("/lib/{category}/{file}"),
            document,
        )
    }

    #[test]
    fn extensions_dedup_first_seen() {
        let modules = [
            module("extensions", "a.json", json!({"recommendations": ["a", "b"]})),
            module("extensions", "b.json", json!({"recommendations": ["b", "c"]})),
        ];
        assert_eq!(collect_extensions(&modules).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn extensions_module_without_recommendations_contributes_nothing() {
        let modules = [module("extensions", "empty.json", json!({"comment": "none"}))];
        assert!(collect_extensions(&modules).unwrap().is_empty());
    }

    #[test]
    fn non_string_recommendation_names_the_module() {
        let modules = [module("extensions", "bad.json", json!({"recommendations": [1]}))];
        let err = collect_extensions(&modules).unwrap_err();
        assert!(err.to_string().contains("/lib/extensions/bad.json"), "got: {err}");
    }

    #[test]
    fn tasks_concatenate_and_inputs_dedup_by_id() {
        let task = json!({"label": "test", "command": "pytest"});
        let modules = [
            module(
                "tasks",
                "a.json",
                json!({"tasks": [task.clone()], "inputs": [{"id": "x", "v": 1}]}),
            ),
            module(
                "tasks",
                "b.json",
                json!({"tasks": [task.clone()], "inputs": [{"id": "x", "v": 2}, {"id": "y"}]}),
            ),
        ];

        let doc = collect_tasks(&modules).unwrap();
        assert_eq!(doc.version, "2.0.0");
        assert_eq!(doc.tasks, vec![task.clone(), task]);
        assert_eq!(doc.inputs, vec![json!({"id": "x", "v": 1}), json!({"id": "y"})]);
    }

    #[test]
    fn tasks_document_omits_empty_inputs() {
        let modules = [module("tasks", "a.json", json!({"tasks": []}))];
        let doc = collect_tasks(&modules).unwrap().to_document().unwrap();
        assert_eq!(doc, json!({"version": "2.0.0", "tasks": []}));
    }

    #[test]
    fn input_without_id_is_malformed() {
        let modules = [module("tasks", "a.json", json!({"inputs": [{"type": "promptString"}]}))];
        assert!(matches!(
            collect_tasks(&modules),
            Err(Error::MalformedModule { .. })
        ));
    }

    #[test]
    fn tasks_must_be_a_list() {
        let modules = [module("tasks", "a.json", json!({"tasks": {"label": "x"}}))];
        let err = collect_tasks(&modules).unwrap_err();
        assert!(err.to_string().contains("'tasks' must be a list"), "got: {err}");
    }
}
