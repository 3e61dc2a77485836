use serde::{Deserialize, Serialize};

/// Module specifiers that belong to the migrated library.
///
/// Matching is exact. `@angular/material-extras` is not part of
/// `@angular/material`, and neither is a relative path that happens to end
/// with the same text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryScope {
    packages: Vec<String>,
}

impl LibraryScope {
    pub fn new(packages: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            packages: packages.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether a module specifier is owned by the library.
    pub fn contains(&self, specifier: &str) -> bool {
        self.packages.iter().any(|p| p == specifier)
    }

    pub fn packages(&self) -> &[String] {
        &self.packages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_exact() {
        let scope = LibraryScope::new(["@angular/material", "@angular/cdk/portal"]);
        assert!(scope.contains("@angular/material"));
        assert!(scope.contains("@angular/cdk/portal"));
        assert!(!scope.contains("@angular/material-extras"));
        assert!(!scope.contains("@angular/cdk"));
        assert!(!scope.contains("./@angular/material"));
        assert!(!scope.contains(""));
    }
}
