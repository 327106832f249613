//! Constants and enums for module library and output paths.

/// Default directory artifacts are written to.
pub const DEFAULT_OUTPUT_DIR: &str = ".vscode";

/// Well-known directories of a module library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryPath {
    /// The `stacks` directory holding manifests
    StacksDir,
    /// The `core` category directory
    CoreDir,
    /// The `settings` category directory
    SettingsDir,
    /// The `extensions` category directory
    ExtensionsDir,
    /// The `tasks` category directory
    TasksDir,
}

impl LibraryPath {
    /// Directories every library must contain.
    pub const REQUIRED: [LibraryPath; 5] = [
        Self::CoreDir,
        Self::SettingsDir,
        Self::ExtensionsDir,
        Self::TasksDir,
        Self::StacksDir,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StacksDir => "stacks",
            Self::CoreDir => "core",
            Self::SettingsDir => "settings",
            Self::ExtensionsDir => "extensions",
            Self::TasksDir => "tasks",
        }
    }
}

impl std::fmt::Display for LibraryPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Artifact files produced by a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactFile {
    Settings,
    Extensions,
    Tasks,
}

impl ArtifactFile {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Settings => "settings.json",
            Self::Extensions => "extensions.json",
            Self::Tasks => "tasks.json",
        }
    }
}

impl std::fmt::Display for ArtifactFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_name())
    }
}
