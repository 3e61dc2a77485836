//! Change data resolved for a single target version.

use std::collections::HashMap;

use matmig_core::Version;
use serde::Serialize;

use crate::{
    Category, ChangeEntry, LibraryScope, MethodCallCheck, Notice, PropertyNotice, RequiredMember,
    Surface, TemplateNotice,
};

/// A check-only entry together with the pull request that introduced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tagged<T> {
    pub pr: String,
    #[serde(flatten)]
    pub item: T,
}

impl<T> std::ops::Deref for Tagged<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.item
    }
}

/// Rename entries of one category, indexed by the deprecated token.
///
/// Every token maps to exactly one entry. Duplicates and chains are rejected
/// before an index is built.
#[derive(Debug, Clone)]
pub struct RenameIndex {
    category: Category,
    entries: Vec<ChangeEntry>,
    by_token: HashMap<String, usize>,
}

impl RenameIndex {
    pub(crate) fn new(category: Category, entries: Vec<ChangeEntry>) -> Self {
        let by_token = entries
            .iter()
            .enumerate()
            .map(|(idx, e)| (e.replace.clone(), idx))
            .collect();
        Self {
            category,
            entries,
            by_token,
        }
    }

    /// Build an index from `(replace, replace_with)` pairs, without a whitelist.
    ///
    /// Intended for tests and embedders that assemble tables in code.
    pub fn from_pairs<'a>(
        category: Category,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let entries = pairs
            .into_iter()
            .map(|(replace, replace_with)| ChangeEntry {
                replace: replace.to_string(),
                replace_with: replace_with.to_string(),
                whitelist: None,
                pr: String::new(),
            })
            .collect();
        Self::new(category, entries)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Find the entry renaming `token`, on any surface.
    pub fn find(&self, token: &str) -> Option<&ChangeEntry> {
        self.by_token.get(token).map(|&idx| &self.entries[idx])
    }

    /// Find the entry renaming `token` if it applies on `surface`.
    pub fn find_for(&self, token: &str, surface: Surface) -> Option<&ChangeEntry> {
        self.find(token).filter(|e| e.applies_to(surface))
    }

    /// Entries in order of introduction.
    pub fn entries(&self) -> &[ChangeEntry] {
        &self.entries
    }

    /// Entries that apply on `surface`, in order of introduction.
    pub fn entries_for(&self, surface: Surface) -> impl Iterator<Item = &ChangeEntry> {
        self.entries.iter().filter(move |e| e.applies_to(surface))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Every table the rules consult, resolved for one target version.
#[derive(Debug, Clone)]
pub struct ActiveChanges {
    pub target: Version,
    pub library: LibraryScope,
    pub class_names: RenameIndex,
    pub attribute_selectors: RenameIndex,
    pub element_selectors: RenameIndex,
    pub css_selectors: RenameIndex,
    pub input_names: RenameIndex,
    pub output_names: RenameIndex,
    pub property_names: RenameIndex,
    pub method_call_checks: Vec<Tagged<MethodCallCheck>>,
    pub identifier_notices: Vec<Tagged<Notice>>,
    pub import_notices: Vec<Tagged<Notice>>,
    pub property_notices: Vec<Tagged<PropertyNotice>>,
    pub template_notices: Vec<Tagged<TemplateNotice>>,
    pub required_members: Vec<Tagged<RequiredMember>>,
}

impl ActiveChanges {
    /// An empty set of changes, trusting the given library.
    pub fn empty(target: Version, library: LibraryScope) -> Self {
        Self {
            target,
            library,
            class_names: RenameIndex::new(Category::ClassNames, Vec::new()),
            attribute_selectors: RenameIndex::new(Category::AttributeSelectors, Vec::new()),
            element_selectors: RenameIndex::new(Category::ElementSelectors, Vec::new()),
            css_selectors: RenameIndex::new(Category::CssSelectors, Vec::new()),
            input_names: RenameIndex::new(Category::InputNames, Vec::new()),
            output_names: RenameIndex::new(Category::OutputNames, Vec::new()),
            property_names: RenameIndex::new(Category::PropertyNames, Vec::new()),
            method_call_checks: Vec::new(),
            identifier_notices: Vec::new(),
            import_notices: Vec::new(),
            property_notices: Vec::new(),
            template_notices: Vec::new(),
            required_members: Vec::new(),
        }
    }

    /// Look up a rename index by category.
    pub fn renames(&self, category: Category) -> Option<&RenameIndex> {
        match category {
            Category::ClassNames => Some(&self.class_names),
            Category::AttributeSelectors => Some(&self.attribute_selectors),
            Category::ElementSelectors => Some(&self.element_selectors),
            Category::CssSelectors => Some(&self.css_selectors),
            Category::InputNames => Some(&self.input_names),
            Category::OutputNames => Some(&self.output_names),
            Category::PropertyNames => Some(&self.property_names),
            _ => None,
        }
    }

    /// Total number of rename entries across all categories.
    pub fn rename_count(&self) -> usize {
        Category::ALL
            .iter()
            .filter_map(|c| self.renames(*c))
            .map(RenameIndex::len)
            .sum()
    }
}
