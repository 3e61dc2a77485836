use std::fmt;

use serde::Serialize;

/// The kind of source text a rule operates on.
///
/// A rename that is valid in a template attribute is not automatically valid
/// inside a TypeScript string literal with the same text, so every change
/// entry is gated per surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Surface {
    /// TypeScript identifiers, property accesses and declarations.
    Code,
    /// TypeScript string and template literals.
    Strings,
    /// CSS / SCSS stylesheets, external or inline.
    Stylesheet,
    /// Angular HTML templates, external or inline.
    Template,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Surface::Code => "code",
            Surface::Strings => "strings",
            Surface::Stylesheet => "stylesheet",
            Surface::Template => "template",
        };
        f.write_str(name)
    }
}
