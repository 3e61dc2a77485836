//! Rename entries and their whitelists.

use serde::{Deserialize, Serialize};

use crate::Surface;

/// One deprecated token and its replacement, as written in a change file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Change {
    pub replace: String,
    pub replace_with: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whitelist: Option<Whitelist>,
}

/// Restricts where a change applies.
///
/// Surface flags (`strings`, `stylesheet`, `template`) select surfaces
/// explicitly. Without flags, an entry scoped to `elements`/`attributes`
/// applies to templates only and an entry scoped to `classes` applies to
/// TypeScript code only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Whitelist {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strings: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<bool>,
    /// Template element tags the change is limited to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<String>,
    /// Template attributes that must be present on the element.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
    /// Library classes whose members the change is limited to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
}

impl Whitelist {
    fn has_surface_flags(&self) -> bool {
        self.strings.is_some() || self.stylesheet.is_some() || self.template.is_some()
    }

    fn is_template_scoped(&self) -> bool {
        !self.elements.is_empty() || !self.attributes.is_empty()
    }

    /// Check whether the change may be applied on the given surface.
    pub fn allows(&self, surface: Surface) -> bool {
        let flag = match surface {
            Surface::Code => return self.elements.is_empty() && self.attributes.is_empty(),
            Surface::Strings => self.strings,
            Surface::Stylesheet => self.stylesheet,
            Surface::Template => self.template,
        };

        if self.has_surface_flags() {
            return flag == Some(true);
        }
        if self.is_template_scoped() {
            return surface == Surface::Template;
        }
        self.classes.is_empty()
    }

    /// Check whether an element with the given tag and attribute names is in scope.
    ///
    /// Unscoped whitelists accept every element. When both lists are given,
    /// matching either one is enough.
    pub fn matches_element<'a>(
        &self,
        tag: &str,
        mut attribute_names: impl Iterator<Item = &'a str>,
    ) -> bool {
        if !self.is_template_scoped() {
            return true;
        }
        if self.elements.iter().any(|e| e.eq_ignore_ascii_case(tag)) {
            return true;
        }
        !self.attributes.is_empty() && attribute_names.any(|a| self.attributes.iter().any(|w| w == a))
    }
}

/// A rename entry resolved for a target version, tagged with its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEntry {
    pub replace: String,
    pub replace_with: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whitelist: Option<Whitelist>,
    pub pr: String,
}

impl ChangeEntry {
    pub(crate) fn from_change(change: &Change, pr: &str) -> Self {
        Self {
            replace: change.replace.clone(),
            replace_with: change.replace_with.clone(),
            whitelist: change.whitelist.clone(),
            pr: pr.to_string(),
        }
    }

    /// Check whether this entry applies on the given surface.
    pub fn applies_to(&self, surface: Surface) -> bool {
        self.whitelist.as_ref().is_none_or(|w| w.allows(surface))
    }

    /// Library classes this entry is limited to (empty when unscoped).
    pub fn classes(&self) -> &[String] {
        self.whitelist
            .as_ref()
            .map(|w| w.classes.as_slice())
            .unwrap_or_default()
    }
}
