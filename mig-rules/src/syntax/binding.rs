//! Angular attribute binding syntax.

/// How an attribute binds to its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// `name="value"`
    Plain,
    /// `[name]` or `bind-name`
    Property,
    /// `(name)` or `on-name`
    Event,
    /// `[(name)]` or `bindon-name`
    TwoWay,
    /// `*name`
    Structural,
    /// `#name` or `ref-name`
    Reference,
}

impl BindingKind {
    /// Whether the binding targets an `@Input()` (or a plain attribute).
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            BindingKind::Plain | BindingKind::Property | BindingKind::TwoWay
        )
    }
}

/// An attribute name split into its binding syntax and bare name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding<'a> {
    pub kind: BindingKind,
    pub name: &'a str,
    /// Offset of `name` within the attribute name.
    pub offset: usize,
}

/// Split an attribute name such as `[(ngModel)]` into kind and bare name.
pub fn parse_binding(attribute: &str) -> Binding<'_> {
    let wrapped = |prefix: &str, suffix: &str, kind| {
        attribute
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix(suffix))
            .filter(|name| !name.is_empty())
            .map(|name| Binding {
                kind,
                name,
                offset: prefix.len(),
            })
    };

    wrapped("[(", ")]", BindingKind::TwoWay)
        .or_else(|| wrapped("[", "]", BindingKind::Property))
        .or_else(|| wrapped("(", ")", BindingKind::Event))
        .or_else(|| wrapped("bindon-", "", BindingKind::TwoWay))
        .or_else(|| wrapped("bind-", "", BindingKind::Property))
        .or_else(|| wrapped("on-", "", BindingKind::Event))
        .or_else(|| wrapped("ref-", "", BindingKind::Reference))
        .or_else(|| wrapped("*", "", BindingKind::Structural))
        .or_else(|| wrapped("#", "", BindingKind::Reference))
        .unwrap_or(Binding {
            kind: BindingKind::Plain,
            name: attribute,
            offset: 0,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_binding() {
        let cases = [
            ("align", BindingKind::Plain, "align", 0),
            ("[align]", BindingKind::Property, "align", 1),
            ("(change)", BindingKind::Event, "change", 1),
            ("[(value)]", BindingKind::TwoWay, "value", 2),
            ("bind-align", BindingKind::Property, "align", 5),
            ("on-change", BindingKind::Event, "change", 3),
            ("bindon-value", BindingKind::TwoWay, "value", 7),
            ("*cdkPortal", BindingKind::Structural, "cdkPortal", 1),
            ("#ref", BindingKind::Reference, "ref", 1),
            ("[class.mat-input-flex]", BindingKind::Property, "class.mat-input-flex", 1),
        ];

        for (attr, kind, name, offset) in cases {
            let binding = parse_binding(attr);
            assert_eq!(binding.kind, kind, "{attr}");
            assert_eq!(binding.name, name, "{attr}");
            assert_eq!(binding.offset, offset, "{attr}");
            assert_eq!(&attr[binding.offset..binding.offset + name.len()], name);
        }
    }

    #[test]
    fn test_unbalanced_brackets_are_plain() {
        assert_eq!(parse_binding("[align").kind, BindingKind::Plain);
        assert_eq!(parse_binding("[]").kind, BindingKind::Plain);
    }
}
