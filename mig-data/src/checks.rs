//! Check-only entries: API changes that cannot be rewritten mechanically.

use serde::{Deserialize, Serialize};

/// A method whose argument count changed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MethodCallCheck {
    pub class_name: String,
    /// Method name, or `constructor` for `new` expressions and `super` calls.
    pub method: String,
    pub invalid_arg_counts: Vec<ArgCountMessage>,
}

impl MethodCallCheck {
    pub fn is_constructor(&self) -> bool {
        self.method == "constructor"
    }

    /// Find the message for a call with `count` arguments, if that count is invalid.
    pub fn message_for(&self, count: usize) -> Option<&str> {
        self.invalid_arg_counts
            .iter()
            .find(|a| a.count == count)
            .map(|a| a.message.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ArgCountMessage {
    pub count: usize,
    pub message: String,
}

/// A removed or retyped symbol (`identifierNotices`, `importNotices`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Notice {
    pub name: String,
    pub message: String,
}

/// A removed property on a library class.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PropertyNotice {
    pub class_name: String,
    pub name: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateNoticeKind {
    Element,
    Input,
    Output,
}

/// A template construct that was removed without a drop-in replacement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateNotice {
    pub kind: TemplateNoticeKind,
    pub name: String,
    /// Elements the input/output notice is limited to (empty means any).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<String>,
    pub message: String,
}

impl TemplateNotice {
    pub fn matches_element(&self, tag: &str) -> bool {
        self.elements.is_empty() || self.elements.iter().any(|e| e.eq_ignore_ascii_case(tag))
    }
}

/// A member that subclasses or implementers of a library class must now define.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RequiredMember {
    pub class_name: String,
    pub member: String,
    pub message: String,
}
