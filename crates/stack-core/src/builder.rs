//! Stack building: resolve, route, fold, substitute, emit
//!
//! A build is a pure transformation of a [`Manifest`] and the documents a
//! [`ModuleSource`] returns for it. Writing is a separate step
//! ([`BuildOutput::write`]) that only runs once every artifact has been
//! produced, so a fatal error never leaves partial output behind.

use indexmap::IndexSet;
use serde::Serialize;
use stack_fs::{ArtifactFile, NormalizedPath, io};
use std::fs;
use std::path::PathBuf;

use crate::collect::{LoadedModule, collect_extensions, collect_tasks, type_name};
use crate::merge::fold_documents;
use crate::substitute::{placeholders, substitute_document};
use crate::{
    Bindings, CategoryKind, Document, Error, Manifest, ModuleReference, ModuleSource, Result,
};

/// Recoverable problem recorded during a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildWarning {
    /// A declared module was not found and was skipped
    MissingModule {
        category: String,
        filename: String,
        path: PathBuf,
    },
}

impl std::fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingModule { path, .. } => {
                write!(f, "Module not found: {}", path.display())
            }
        }
    }
}

/// One emitted output document.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub kind: ArtifactFile,
    pub document: Document,
}

impl Artifact {
    pub fn file_name(&self) -> &'static str {
        self.kind.file_name()
    }

    /// Pretty-printed JSON with a trailing newline.
    pub fn render(&self) -> Result<String> {
        let mut text = serde_json::to_string_pretty(&self.document)?;
        text.push('\n');
        Ok(text)
    }
}

/// Result of a successful build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutput {
    pub name: String,
    pub settings: Option<Artifact>,
    pub extensions: Option<Artifact>,
    pub tasks: Option<Artifact>,
    pub warnings: Vec<BuildWarning>,
    /// Number of declared modules that resolved
    pub modules_loaded: usize,
}

impl BuildOutput {
    /// Artifacts in emission order: settings, extensions, tasks.
    pub fn artifacts(&self) -> impl Iterator<Item = &Artifact> {
        [&self.settings, &self.extensions, &self.tasks]
            .into_iter()
            .flatten()
    }

    /// Placeholders left unresolved in any artifact, first-seen order.
    pub fn unresolved_placeholders(&self) -> Result<Vec<String>> {
        let mut names = IndexSet::new();
        for artifact in self.artifacts() {
            let text = serde_json::to_string(&artifact.document)?;
            names.extend(placeholders(&text));
        }
        Ok(names.into_iter().collect())
    }

    /// Write every artifact into `out_dir`, creating it if needed.
    ///
    /// All artifacts are rendered before the first write. If a write fails,
    /// the artifacts this call already wrote are removed again, so either
    /// every artifact lands or none does.
    pub fn write(&self, out_dir: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
        let rendered = self
            .artifacts()
            .map(|artifact| Ok((out_dir.join(artifact.file_name()), artifact.render()?)))
            .collect::<Result<Vec<_>>>()?;

        let mut written = Vec::with_capacity(rendered.len());
        for (path, text) in rendered {
            if let Err(e) = io::write_text(&path, &text) {
                remove_written(&written);
                return Err(e.into());
            }
            tracing::info!(%path, "Wrote artifact");
            written.push(path);
        }
        Ok(written)
    }
}

fn remove_written(paths: &[NormalizedPath]) {
    for path in paths {
        match fs::remove_file(path.to_native()) {
            Ok(()) => tracing::debug!(%path, "Removed artifact after failed write"),
            Err(e) => tracing::warn!(%path, error = %e, "Could not remove artifact after failed write"),
        }
    }
}

/// Modules partitioned by the category kind they fold into.
#[derive(Debug, Default)]
struct Resolved {
    merge: Vec<LoadedModule>,
    extensions: Vec<LoadedModule>,
    tasks: Vec<LoadedModule>,
    warnings: Vec<BuildWarning>,
}

impl Resolved {
    fn bucket(&mut self, kind: CategoryKind) -> &mut Vec<LoadedModule> {
        match kind {
            CategoryKind::Merge => &mut self.merge,
            CategoryKind::Extensions => &mut self.extensions,
            CategoryKind::Tasks => &mut self.tasks,
        }
    }

    fn loaded(&self) -> usize {
        self.merge.len() + self.extensions.len() + self.tasks.len()
    }
}

/// Composes the artifacts of a manifest from a module source.
pub struct StackBuilder<'a> {
    source: &'a dyn ModuleSource,
}

impl<'a> StackBuilder<'a> {
    pub fn new(source: &'a dyn ModuleSource) -> Self {
        Self { source }
    }

    /// Build the artifacts for `manifest` with runtime `overrides` applied.
    ///
    /// Missing modules are skipped and recorded as warnings. A module that
    /// fails to parse, is not a mapping, or whose shape does not fit its
    /// category, aborts the build.
    pub fn build(&self, manifest: &Manifest, overrides: &Bindings) -> Result<BuildOutput> {
        let manifest = manifest.with_overrides(overrides);
        tracing::debug!(stack = %manifest.name, variables = manifest.variables.len(), "Building stack");

        let resolved = self.resolve(&manifest)?;
        let bindings = &manifest.variables;

        let settings = if manifest.declares(CategoryKind::Merge) {
            let folded = fold_documents(resolved.merge.iter().map(|m| &m.document));
            Some(finish(CategoryKind::Merge.artifact(), &folded, bindings)?)
        } else {
            None
        };

        let extensions = if manifest.declares(CategoryKind::Extensions) {
            let recommendations = collect_extensions(&resolved.extensions)?;
            let document = serde_json::json!({ "recommendations": recommendations });
            Some(finish(CategoryKind::Extensions.artifact(), &document, bindings)?)
        } else {
            None
        };

        let tasks = if manifest.declares(CategoryKind::Tasks) {
            let document = collect_tasks(&resolved.tasks)?.to_document()?;
            Some(finish(CategoryKind::Tasks.artifact(), &document, bindings)?)
        } else {
            None
        };

        Ok(BuildOutput {
            name: manifest.name.clone(),
            settings,
            extensions,
            tasks,
            modules_loaded: resolved.loaded(),
            warnings: resolved.warnings,
        })
    }

    fn resolve(&self, manifest: &Manifest) -> Result<Resolved> {
        let mut resolved = Resolved::default();

        for reference in manifest.references() {
            let path = self.source.locate(&reference);
            match self.source.load(&reference)? {
                Some(document) if !document.is_object() => {
                    return Err(Error::malformed_module(
                        path,
                        format!("module must be a mapping, found {}", type_name(&document)),
                    ));
                }
                Some(document) => {
                    tracing::debug!(module = %reference, "Resolved module");
                    let kind = reference.kind();
                    resolved
                        .bucket(kind)
                        .push(LoadedModule::new(reference, path, document));
                }
                None => {
                    tracing::warn!(module = %reference, path = %path.display(), "Module not found, skipping");
                    let ModuleReference { category, filename } = reference;
                    resolved.warnings.push(BuildWarning::MissingModule {
                        category,
                        filename,
                        path,
                    });
                }
            }
        }

        Ok(resolved)
    }
}

fn finish(kind: ArtifactFile, document: &Document, bindings: &Bindings) -> Result<Artifact> {
    Ok(Artifact {
        kind,
        document: substitute_document(document, bindings, kind.file_name())?,
    })
}
