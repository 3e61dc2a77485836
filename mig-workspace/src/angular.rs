//! Reading `angular.json`.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::{Result, WorkspaceError};

pub const WORKSPACE_FILE: &str = "angular.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkspaceConfig {
    #[serde(default)]
    projects: IndexMap<String, ProjectConfig>,
    #[serde(default)]
    default_project: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectConfig {
    #[serde(default)]
    root: String,
    #[serde(default)]
    source_root: Option<String>,
    /// `architect` in older workspaces, `targets` in newer ones.
    #[serde(default, alias = "targets")]
    architect: IndexMap<String, TargetConfig>,
}

#[derive(Debug, Clone, Deserialize)]
struct TargetConfig {
    #[serde(default)]
    options: serde_json::Map<String, serde_json::Value>,
}

/// An Angular CLI workspace.
#[derive(Debug, Clone)]
pub struct AngularWorkspace {
    root: PathBuf,
    config: WorkspaceConfig,
}

impl AngularWorkspace {
    /// Open the workspace whose `angular.json` lives in `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let path = root.join(WORKSPACE_FILE);
        let content = std::fs::read_to_string(&path).map_err(|source| WorkspaceError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_json(root, &content).map_err(|source| WorkspaceError::Parse { path, source })
    }

    fn from_json(root: &Path, content: &str) -> serde_json::Result<Self> {
        let config: WorkspaceConfig = serde_json::from_str(content)?;
        debug!(projects = config.projects.len(), "loaded angular workspace");
        Ok(Self {
            root: root.to_path_buf(),
            config,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn project_names(&self) -> impl Iterator<Item = &str> {
        self.config.projects.keys().map(String::as_str)
    }

    /// The configured default project, or the only project of the workspace.
    pub fn default_project(&self) -> Option<&str> {
        self.config.default_project.as_deref().or_else(|| {
            (self.config.projects.len() == 1)
                .then(|| self.project_names().next())
                .flatten()
        })
    }

    /// Absolute path of the project root.
    pub fn project_root(&self, name: &str) -> Result<PathBuf> {
        Ok(self.root.join(&self.project(name)?.root))
    }

    /// Absolute path of the project's source root (`<root>/src` when unset).
    pub fn project_source_root(&self, name: &str) -> Result<PathBuf> {
        let project = self.project(name)?;
        Ok(match &project.source_root {
            Some(source_root) => self.root.join(source_root),
            None => self.root.join(&project.root).join("src"),
        })
    }

    /// The `main` option of the project's build target, relative to the workspace.
    pub fn project_main_file(&self, name: &str) -> Result<PathBuf> {
        let main = self
            .project(name)?
            .architect
            .get("build")
            .and_then(|build| build.options.get("main"))
            .and_then(|main| main.as_str())
            .ok_or_else(|| WorkspaceError::NoMainFile {
                name: name.to_string(),
            })?;
        Ok(self.root.join(main))
    }

    fn project(&self, name: &str) -> Result<&ProjectConfig> {
        self.config
            .projects
            .get(name)
            .ok_or_else(|| WorkspaceError::UnknownProject {
                name: name.to_string(),
            })
    }
}
