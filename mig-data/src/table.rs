//! Versioned change tables and their on-disk formats.

use std::path::Path;

use matmig_core::Version;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Category, Error, Result, error::SourceContext};

/// Changes introduced by one upstream pull request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChangeGroup<T> {
    pub pr: String,
    /// First target version the group applies to (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<Version>,
    /// First target version the group no longer applies to (exclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<Version>,
    pub changes: Vec<T>,
}

impl<T> ChangeGroup<T> {
    pub fn is_active(&self, target: &Version) -> bool {
        target.in_range(self.since.as_ref(), self.until.as_ref())
    }
}

/// Root of a TOML change file: `[[group]]` tables.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlChanges<T> {
    #[serde(default = "Vec::new")]
    group: Vec<ChangeGroup<T>>,
}

/// All groups of one category, with the source they were parsed from.
#[derive(Debug, Clone)]
pub struct ChangeTable<T> {
    category: Category,
    groups: Vec<ChangeGroup<T>>,
    source: SourceContext,
}

impl<T: DeserializeOwned> ChangeTable<T> {
    /// Create a table with no groups.
    pub fn empty(category: Category) -> Self {
        Self {
            category,
            groups: Vec::new(),
            source: SourceContext::new("", category.file_stem()),
        }
    }

    /// Parse a TOML change file (`[[group]]` tables).
    pub fn from_toml_str(category: Category, content: &str, filename: &str) -> Result<Self> {
        let source = SourceContext::new(content, filename);
        let root: TomlChanges<T> =
            toml::from_str(content).map_err(|e| source.parse_error(e))?;
        Ok(Self {
            category,
            groups: root.group,
            source,
        })
    }

    /// Parse a JSON change file (`[{pr, changes: [...]}]`).
    pub fn from_json_str(category: Category, content: &str, filename: &str) -> Result<Self> {
        let source = SourceContext::new(content, filename);
        let groups: Vec<ChangeGroup<T>> =
            serde_json::from_str(content).map_err(|e| source.json_error(e))?;
        Ok(Self {
            category,
            groups,
            source,
        })
    }

    /// Load a change file, choosing the format from its extension.
    pub fn from_file(category: Category, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(category, &content, &filename),
            _ => Self::from_toml_str(category, &content, &filename),
        }
    }
}

impl<T> ChangeTable<T> {
    pub fn category(&self) -> Category {
        self.category
    }

    pub fn groups(&self) -> &[ChangeGroup<T>] {
        &self.groups
    }

    pub fn source(&self) -> &SourceContext {
        &self.source
    }

    /// Iterate over entries active for `target`, in order of introduction.
    ///
    /// The iterator borrows only the table, so `target` may be a temporary.
    pub fn active<'a>(
        &'a self,
        target: &Version,
    ) -> impl Iterator<Item = (&'a str, &'a T)> + use<'a, T> {
        let target = *target;
        self.groups
            .iter()
            .filter(move |g| g.is_active(&target))
            .flat_map(|g| g.changes.iter().map(move |c| (g.pr.as_str(), c)))
    }

    /// Every `since`/`until` bound mentioned by this table.
    pub fn boundaries(&self) -> impl Iterator<Item = Version> + '_ {
        self.groups
            .iter()
            .flat_map(|g| g.since.iter().chain(g.until.iter()).copied())
    }
}
