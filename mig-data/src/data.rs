//! Loading and resolving the full set of change tables.

use std::path::Path;

use matmig_core::Version;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::{
    ActiveChanges, Category, Change, ChangeEntry, ChangeTable, Error, LibraryScope,
    MethodCallCheck, Notice, PropertyNotice, RenameIndex, RequiredMember, Result, Tagged,
    TemplateNotice, error::SourceContext, validate::check_renames,
};

const LIBRARY_FILE: &str = "library.toml";

mod builtin {
    pub const LIBRARY: &str = include_str!("../data/library.toml");
    pub const CLASS_NAMES: &str = include_str!("../data/class-names.toml");
    pub const ATTRIBUTE_SELECTORS: &str = include_str!("../data/attribute-selectors.toml");
    pub const ELEMENT_SELECTORS: &str = include_str!("../data/element-selectors.toml");
    pub const CSS_SELECTORS: &str = include_str!("../data/css-selectors.toml");
    pub const INPUT_NAMES: &str = include_str!("../data/input-names.toml");
    pub const OUTPUT_NAMES: &str = include_str!("../data/output-names.toml");
    pub const PROPERTY_NAMES: &str = include_str!("../data/property-names.toml");
    pub const METHOD_CALL_CHECKS: &str = include_str!("../data/method-call-checks.toml");
    pub const IDENTIFIER_NOTICES: &str = include_str!("../data/identifier-notices.toml");
    pub const IMPORT_NOTICES: &str = include_str!("../data/import-notices.toml");
    pub const PROPERTY_NOTICES: &str = include_str!("../data/property-notices.toml");
    pub const TEMPLATE_NOTICES: &str = include_str!("../data/template-notices.toml");
    pub const REQUIRED_MEMBERS: &str = include_str!("../data/required-members.toml");
}

/// The complete, unresolved change data: every category across all versions.
#[derive(Debug, Clone)]
pub struct ChangeData {
    pub library: LibraryScope,
    pub class_names: ChangeTable<Change>,
    pub attribute_selectors: ChangeTable<Change>,
    pub element_selectors: ChangeTable<Change>,
    pub css_selectors: ChangeTable<Change>,
    pub input_names: ChangeTable<Change>,
    pub output_names: ChangeTable<Change>,
    pub property_names: ChangeTable<Change>,
    pub method_call_checks: ChangeTable<MethodCallCheck>,
    pub identifier_notices: ChangeTable<Notice>,
    pub import_notices: ChangeTable<Notice>,
    pub property_notices: ChangeTable<PropertyNotice>,
    pub template_notices: ChangeTable<TemplateNotice>,
    pub required_members: ChangeTable<RequiredMember>,
}

impl ChangeData {
    /// The change data shipped with this crate.
    pub fn builtin() -> Result<Self> {
        fn table<T: DeserializeOwned>(category: Category, src: &str) -> Result<ChangeTable<T>> {
            let filename = format!("{}.toml", category.file_stem());
            ChangeTable::from_toml_str(category, src, &filename)
        }

        Ok(Self {
            library: parse_library(builtin::LIBRARY, LIBRARY_FILE)?,
            class_names: table(Category::ClassNames, builtin::CLASS_NAMES)?,
            attribute_selectors: table(Category::AttributeSelectors, builtin::ATTRIBUTE_SELECTORS)?,
            element_selectors: table(Category::ElementSelectors, builtin::ELEMENT_SELECTORS)?,
            css_selectors: table(Category::CssSelectors, builtin::CSS_SELECTORS)?,
            input_names: table(Category::InputNames, builtin::INPUT_NAMES)?,
            output_names: table(Category::OutputNames, builtin::OUTPUT_NAMES)?,
            property_names: table(Category::PropertyNames, builtin::PROPERTY_NAMES)?,
            method_call_checks: table(Category::MethodCallChecks, builtin::METHOD_CALL_CHECKS)?,
            identifier_notices: table(Category::IdentifierNotices, builtin::IDENTIFIER_NOTICES)?,
            import_notices: table(Category::ImportNotices, builtin::IMPORT_NOTICES)?,
            property_notices: table(Category::PropertyNotices, builtin::PROPERTY_NOTICES)?,
            template_notices: table(Category::TemplateNotices, builtin::TEMPLATE_NOTICES)?,
            required_members: table(Category::RequiredMembers, builtin::REQUIRED_MEMBERS)?,
        })
    }

    /// Load change data from a directory of `<category>.toml` / `<category>.json` files.
    ///
    /// Categories without a file are empty. Without a `library.toml` the
    /// built-in library scope is used.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Box::new(Error::Io {
                path: dir.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            }));
        }

        fn table<T: DeserializeOwned>(dir: &Path, category: Category) -> Result<ChangeTable<T>> {
            for ext in ["toml", "json"] {
                let path = dir.join(format!("{}.{}", category.file_stem(), ext));
                if path.is_file() {
                    debug!(category = %category, path = %path.display(), "loading change table");
                    return ChangeTable::from_file(category, &path);
                }
            }
            Ok(ChangeTable::empty(category))
        }

        let library_path = dir.join(LIBRARY_FILE);
        let library = if library_path.is_file() {
            let content = std::fs::read_to_string(&library_path).map_err(|e| {
                Box::new(Error::Io {
                    path: library_path.clone(),
                    source: e,
                })
            })?;
            parse_library(&content, &library_path.display().to_string())?
        } else {
            parse_library(builtin::LIBRARY, LIBRARY_FILE)?
        };

        Ok(Self {
            library,
            class_names: table(dir, Category::ClassNames)?,
            attribute_selectors: table(dir, Category::AttributeSelectors)?,
            element_selectors: table(dir, Category::ElementSelectors)?,
            css_selectors: table(dir, Category::CssSelectors)?,
            input_names: table(dir, Category::InputNames)?,
            output_names: table(dir, Category::OutputNames)?,
            property_names: table(dir, Category::PropertyNames)?,
            method_call_checks: table(dir, Category::MethodCallChecks)?,
            identifier_notices: table(dir, Category::IdentifierNotices)?,
            import_notices: table(dir, Category::ImportNotices)?,
            property_notices: table(dir, Category::PropertyNotices)?,
            template_notices: table(dir, Category::TemplateNotices)?,
            required_members: table(dir, Category::RequiredMembers)?,
        })
    }

    /// Resolve every table for `target`, validating rename integrity.
    ///
    /// Fails on the first category containing a duplicate, self-referencing
    /// or chained rename.
    pub fn resolve(&self, target: &Version) -> Result<ActiveChanges> {
        let active = ActiveChanges {
            target: *target,
            library: self.library.clone(),
            class_names: resolve_renames(&self.class_names, target)?,
            attribute_selectors: resolve_renames(&self.attribute_selectors, target)?,
            element_selectors: resolve_renames(&self.element_selectors, target)?,
            css_selectors: resolve_renames(&self.css_selectors, target)?,
            input_names: resolve_renames(&self.input_names, target)?,
            output_names: resolve_renames(&self.output_names, target)?,
            property_names: resolve_renames(&self.property_names, target)?,
            method_call_checks: resolve_checks(&self.method_call_checks, target),
            identifier_notices: resolve_checks(&self.identifier_notices, target),
            import_notices: resolve_checks(&self.import_notices, target),
            property_notices: resolve_checks(&self.property_notices, target),
            template_notices: resolve_checks(&self.template_notices, target),
            required_members: resolve_checks(&self.required_members, target),
        };

        info!(
            target = %target,
            renames = active.rename_count(),
            "resolved change data"
        );
        Ok(active)
    }

    /// Versions at which the set of active entries can change, in ascending order.
    ///
    /// The lowest possible version is always included.
    pub fn version_boundaries(&self) -> Vec<Version> {
        let mut bounds = vec![Version::default()];
        bounds.extend(self.class_names.boundaries());
        bounds.extend(self.attribute_selectors.boundaries());
        bounds.extend(self.element_selectors.boundaries());
        bounds.extend(self.css_selectors.boundaries());
        bounds.extend(self.input_names.boundaries());
        bounds.extend(self.output_names.boundaries());
        bounds.extend(self.property_names.boundaries());
        bounds.extend(self.method_call_checks.boundaries());
        bounds.extend(self.identifier_notices.boundaries());
        bounds.extend(self.import_notices.boundaries());
        bounds.extend(self.property_notices.boundaries());
        bounds.extend(self.template_notices.boundaries());
        bounds.extend(self.required_members.boundaries());
        bounds.sort();
        bounds.dedup();
        bounds
    }

    /// Validate every rename table at every version boundary.
    ///
    /// Unlike [`ChangeData::resolve`], all problems are collected. An entry
    /// that is broken across several version ranges is reported once.
    pub fn audit(&self) -> Vec<Box<Error>> {
        let tables = [
            &self.class_names,
            &self.attribute_selectors,
            &self.element_selectors,
            &self.css_selectors,
            &self.input_names,
            &self.output_names,
            &self.property_names,
        ];

        let mut errors: Vec<Box<Error>> = Vec::new();
        let mut seen: Vec<String> = Vec::new();
        for target in self.version_boundaries() {
            for table in tables {
                if let Err(err) = resolve_renames(table, &target) {
                    let key = format!("{}: {}", table.category(), err);
                    if !seen.contains(&key) {
                        seen.push(key);
                        errors.push(err);
                    }
                }
            }
        }
        errors
    }
}

fn parse_library(src: &str, filename: &str) -> Result<LibraryScope> {
    let source = SourceContext::new(src, filename);
    let scope: LibraryScope = toml::from_str(src).map_err(|e| source.parse_error(e))?;
    if scope.packages().is_empty() {
        return Err(source.validation_error("library.toml must list at least one package", None));
    }
    Ok(scope)
}

fn resolve_renames(table: &ChangeTable<Change>, target: &Version) -> Result<RenameIndex> {
    let entries: Vec<ChangeEntry> = table
        .active(target)
        .map(|(pr, change)| ChangeEntry::from_change(change, pr))
        .collect();
    check_renames(table.category(), &entries, table.source())?;
    Ok(RenameIndex::new(table.category(), entries))
}

fn resolve_checks<T: Clone>(table: &ChangeTable<T>, target: &Version) -> Vec<Tagged<T>> {
    table
        .active(target)
        .map(|(pr, item)| Tagged {
            pr: pr.to_string(),
            item: item.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Surface;

    #[test]
    fn test_builtin_resolves_for_supported_targets() {
        let data = ChangeData::builtin().unwrap();
        for target in ["6", "7", "7.1.0"] {
            let version: Version = target.parse().unwrap();
            let active = data.resolve(&version).unwrap();
            assert!(!active.class_names.is_empty());
            assert!(active.library.contains("@angular/material"));
        }
    }

    #[test]
    fn test_builtin_since_gates_entries() {
        let data = ChangeData::builtin().unwrap();
        let v6 = data.resolve(&Version::new(6, 0, 0)).unwrap();
        let v7 = data.resolve(&Version::new(7, 0, 0)).unwrap();

        assert!(v6.class_names.find("MatVerticalStepper").is_none());
        assert_eq!(
            v7.class_names.find("MatVerticalStepper").unwrap().replace_with,
            "MatStepper"
        );
        assert!(v6.class_names.find("PortalHost").is_some());
    }

    #[test]
    fn test_builtin_audit_is_clean() {
        let data = ChangeData::builtin().unwrap();
        let errors = data.audit();
        assert!(errors.is_empty(), "{errors:?}");
        assert!(data.version_boundaries().contains(&Version::new(7, 0, 0)));
    }

    #[test]
    fn test_builtin_surfaces() {
        let data = ChangeData::builtin().unwrap();
        let active = data.resolve(&Version::new(6, 0, 0)).unwrap();

        let placeholder = active.css_selectors.find("mat-input-placeholder").unwrap();
        assert!(placeholder.applies_to(Surface::Stylesheet));
        assert!(!placeholder.applies_to(Surface::Template));

        let align = active.input_names.find("align").unwrap();
        assert!(align.applies_to(Surface::Template));
        assert!(!align.applies_to(Surface::Strings));
    }

    #[test]
    fn test_from_dir_missing_categories_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("class-names.json"),
            r#"[{"pr": "p", "changes": [{"replace": "Foo", "replaceWith": "Bar"}]}]"#,
        )
        .unwrap();

        let data = ChangeData::from_dir(dir.path()).unwrap();
        let active = data.resolve(&Version::new(6, 0, 0)).unwrap();
        assert_eq!(active.class_names.find("Foo").unwrap().replace_with, "Bar");
        assert!(active.css_selectors.is_empty());
        assert!(active.method_call_checks.is_empty());
        assert!(active.library.contains("@angular/cdk/portal"));
    }

    #[test]
    fn test_from_dir_custom_library() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("library.toml"), r#"packages = ["my-lib"]"#).unwrap();

        let data = ChangeData::from_dir(dir.path()).unwrap();
        assert!(data.library.contains("my-lib"));
        assert!(!data.library.contains("@angular/material"));
    }

    #[test]
    fn test_from_dir_rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = ChangeData::from_dir(dir.path().join("nope")).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }

    #[test]
    fn test_chain_across_groups_rejected_at_resolve() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("element-selectors.toml"),
            r#"
[[group]]
pr = "first"
changes = [{ replace = "mat-a", replaceWith = "mat-b" }]

[[group]]
pr = "second"
since = "7"
changes = [{ replace = "mat-b", replaceWith = "mat-c" }]
"#,
        )
        .unwrap();

        let data = ChangeData::from_dir(dir.path()).unwrap();
        assert!(data.resolve(&Version::new(6, 0, 0)).is_ok());
        let err = data.resolve(&Version::new(7, 0, 0)).unwrap_err();
        assert!(matches!(*err, Error::ChainedRename { .. }));
        assert_eq!(data.audit().len(), 1);
    }

    #[test]
    fn test_disjoint_ranges_allow_same_token() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("class-names.toml"),
            r#"
[[group]]
pr = "old"
until = "7"
changes = [{ replace = "Foo", replaceWith = "Bar" }]

[[group]]
pr = "new"
since = "7"
changes = [{ replace = "Foo", replaceWith = "Baz" }]
"#,
        )
        .unwrap();

        let data = ChangeData::from_dir(dir.path()).unwrap();
        assert!(data.audit().is_empty());
        let v7 = data.resolve(&Version::new(7, 0, 0)).unwrap();
        assert_eq!(v7.class_names.find("Foo").unwrap().replace_with, "Baz");
    }
}
