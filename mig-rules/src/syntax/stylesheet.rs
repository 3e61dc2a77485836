//! A selector-oriented lexer for CSS and SCSS.
//!
//! The rules only rename selector tokens, so the lexer does not build a
//! syntax tree. It tracks whether each token belongs to a selector, a
//! declaration or an at-rule prelude and skips comments, strings, `url(...)`
//! and SCSS interpolation.

use matmig_core::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleTokenKind {
    /// A bare identifier, such as an element name.
    Ident,
    /// The name after a `.`.
    ClassName,
    /// The name after a `#`.
    IdName,
    /// The attribute name inside `[...]`.
    AttributeName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleContext {
    /// Text before a `{` that opens a rule block.
    Selector,
    /// A property declaration.
    Declaration,
    /// The prelude of an at-rule (`@media ...`, `@extend ...`).
    AtRule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleToken {
    pub kind: StyleTokenKind,
    pub context: StyleContext,
    /// Absolute span in the containing file.
    pub span: Span,
    pub text: String,
}

/// A tokenized stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    tokens: Vec<StyleToken>,
}

impl Stylesheet {
    /// Tokenize stylesheet text located at `base` in its file.
    pub fn lex(text: &str, base: usize) -> Self {
        let mut lexer = Lexer {
            text,
            base,
            tokens: Vec::new(),
            pending: Vec::new(),
            at_rule: None,
        };
        lexer.run();
        Self {
            tokens: lexer.tokens,
        }
    }

    pub fn tokens(&self) -> &[StyleToken] {
        &self.tokens
    }

    /// Tokens of `kind` that appear in a selector or at-rule prelude.
    pub fn selector_tokens(&self, kind: StyleTokenKind) -> impl Iterator<Item = &StyleToken> {
        self.tokens
            .iter()
            .filter(move |t| t.kind == kind && t.context != StyleContext::Declaration)
    }
}

struct Lexer<'a> {
    text: &'a str,
    base: usize,
    tokens: Vec<StyleToken>,
    pending: Vec<(StyleTokenKind, usize, usize)>,
    /// Whether the current segment starts with `@`; `None` until its first byte.
    at_rule: Option<bool>,
}

impl Lexer<'_> {
    fn run(&mut self) {
        let bytes = self.text.as_bytes();
        let len = bytes.len();
        let mut i = 0;

        while i < len {
            let b = bytes[i];
            let next = bytes.get(i + 1).copied();

            match b {
                b'/' if next == Some(b'*') => {
                    i = self.text[i + 2..]
                        .find("*/")
                        .map(|p| i + 2 + p + 2)
                        .unwrap_or(len);
                }
                b'/' if next == Some(b'/') && line_comment_allowed(bytes, i) => {
                    i = self.text[i..].find('\n').map(|p| i + p).unwrap_or(len);
                }
                b'"' | b'\'' => {
                    self.mark(b);
                    i = skip_string(bytes, i);
                }
                b'#' if next == Some(b'{') => {
                    self.mark(b);
                    i = skip_interpolation(bytes, i + 1);
                }
                b'{' => {
                    self.flush(StyleContext::Selector);
                    i += 1;
                }
                b';' | b'}' => {
                    self.flush(StyleContext::Declaration);
                    i += 1;
                }
                b'.' if ident_start(bytes, i + 1) => {
                    i = self.push(StyleTokenKind::ClassName, i + 1);
                }
                b'#' if ident_start(bytes, i + 1) => {
                    i = self.push(StyleTokenKind::IdName, i + 1);
                }
                b'[' => {
                    self.mark(b);
                    let mut j = i + 1;
                    while j < len && bytes[j].is_ascii_whitespace() {
                        j += 1;
                    }
                    i = if ident_start(bytes, j) {
                        self.push(StyleTokenKind::AttributeName, j)
                    } else {
                        i + 1
                    };
                }
                b'0'..=b'9' => {
                    // Numbers and their units (`10px`, `.5em`)
                    self.mark(b);
                    i = ident_end(bytes, i);
                }
                _ if ident_start(bytes, i) => {
                    let end = ident_end(bytes, i);
                    if self.text[i..end].eq_ignore_ascii_case("url") && bytes.get(end) == Some(&b'(') {
                        self.mark(b);
                        i = self.text[end..]
                            .find(')')
                            .map(|p| end + p + 1)
                            .unwrap_or(len);
                    } else {
                        i = self.push(StyleTokenKind::Ident, i);
                    }
                }
                _ => {
                    if !b.is_ascii_whitespace() {
                        self.mark(b);
                    }
                    i += 1;
                }
            }
        }

        self.flush(StyleContext::Declaration);
    }

    fn mark(&mut self, b: u8) {
        if self.at_rule.is_none() {
            self.at_rule = Some(b == b'@');
        }
    }

    /// Record an identifier starting at `start`, returning the offset after it.
    fn push(&mut self, kind: StyleTokenKind, start: usize) -> usize {
        let end = ident_end(self.text.as_bytes(), start);
        self.mark(0);
        self.pending.push((kind, start, end));
        end
    }

    /// Assign a context to the pending tokens of the current segment.
    fn flush(&mut self, context: StyleContext) {
        let context = if self.at_rule == Some(true) {
            StyleContext::AtRule
        } else {
            context
        };
        for (kind, start, end) in self.pending.drain(..) {
            self.tokens.push(StyleToken {
                kind,
                context,
                span: Span::from_range(start, end).offset(self.base),
                text: self.text[start..end].to_string(),
            });
        }
        self.at_rule = None;
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b >= 0x80
}

fn ident_start(bytes: &[u8], i: usize) -> bool {
    match bytes.get(i) {
        Some(b) if b.is_ascii_alphabetic() || *b == b'_' || *b >= 0x80 => true,
        Some(b'-') => bytes
            .get(i + 1)
            .is_some_and(|n| n.is_ascii_alphabetic() || matches!(n, b'-' | b'_')),
        _ => false,
    }
}

fn ident_end(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < bytes.len() && is_ident_byte(bytes[end]) {
        end += 1;
    }
    end
}

fn line_comment_allowed(bytes: &[u8], i: usize) -> bool {
    i == 0 || matches!(bytes[i - 1], b' ' | b'\t' | b'\n' | b'\r' | b';' | b'{' | b'}')
}

fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut j = start + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'\n' => return j,
            b if b == quote => return j + 1,
            _ => j += 1,
        }
    }
    bytes.len()
}

/// Skip a `{...}` interpolation body starting at the opening brace.
fn skip_interpolation(bytes: &[u8], open: usize) -> usize {
    let mut depth = 0usize;
    let mut j = open;
    while j < bytes.len() {
        match bytes[j] {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return j + 1;
                }
            }
            _ => {}
        }
        j += 1;
    }
    bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector_texts(sheet: &Stylesheet, kind: StyleTokenKind) -> Vec<&str> {
        sheet.selector_tokens(kind).map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_selectors_and_declarations() {
        let src = "mat-input-container .mat-input-flex, [cdkPortalHost] { color: red; width: .5em }";
        let sheet = Stylesheet::lex(src, 0);

        assert_eq!(
            selector_texts(&sheet, StyleTokenKind::Ident),
            vec!["mat-input-container"]
        );
        assert_eq!(
            selector_texts(&sheet, StyleTokenKind::ClassName),
            vec!["mat-input-flex"]
        );
        assert_eq!(
            selector_texts(&sheet, StyleTokenKind::AttributeName),
            vec!["cdkPortalHost"]
        );

        let declarations: Vec<&str> = sheet
            .tokens()
            .iter()
            .filter(|t| t.context == StyleContext::Declaration)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(declarations, vec!["color", "red", "width"]);
    }

    #[test]
    fn test_spans_are_absolute() {
        let file = "xx.mat-input-flex {}";
        let sheet = Stylesheet::lex(&file[2..], 2);
        let token = &sheet.tokens()[0];
        assert_eq!(&file[token.span.range()], "mat-input-flex");
    }

    #[test]
    fn test_comments_strings_and_urls_skipped() {
        let src = r#"
/* .mat-input-flex { } */
// .mat-input-infix
a[title="mat-input-container"] { background: url(mat-input-wrapper.png); content: '.mat-input-prefix'; }
"#;
        let sheet = Stylesheet::lex(src, 0);
        let texts: Vec<&str> = sheet.tokens().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "title", "background", "content"]);
    }

    #[test]
    fn test_scss_nesting_and_at_rules() {
        let src = r#"
.parent {
  color: red;
  .mat-input-flex { margin: 0; }
  @extend .mat-input-wrapper;
  @media (max-width: 10px) { mat-input-container { display: none; } }
  .#{$prefix}-thing { }
}
"#;
        let sheet = Stylesheet::lex(src, 0);

        let classes: Vec<(&str, StyleContext)> = sheet
            .tokens()
            .iter()
            .filter(|t| t.kind == StyleTokenKind::ClassName)
            .map(|t| (t.text.as_str(), t.context))
            .collect();
        assert_eq!(
            classes,
            vec![
                ("parent", StyleContext::Selector),
                ("mat-input-flex", StyleContext::Selector),
                ("mat-input-wrapper", StyleContext::AtRule),
            ]
        );
        assert!(selector_texts(&sheet, StyleTokenKind::Ident).contains(&"mat-input-container"));
    }

    #[test]
    fn test_url_with_double_slash_is_not_a_comment() {
        let src = ".a { background: url(http://x/y.png); } .mat-input-flex {}";
        let sheet = Stylesheet::lex(src, 0);
        assert!(selector_texts(&sheet, StyleTokenKind::ClassName).contains(&"mat-input-flex"));
    }
}
