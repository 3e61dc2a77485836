//! Integrity checks for resolved rename tables.

use std::collections::HashMap;

use miette::SourceSpan;

use crate::{Category, ChangeEntry, Result, error::SourceContext};

/// Find every span where `token` is declared as a `replace` value.
///
/// Both the TOML (`replace = "x"`) and JSON (`"replace": "x"`) spellings are
/// recognised. Spans are returned in source order.
pub(crate) fn find_replace_spans(src: &str, token: &str) -> Vec<SourceSpan> {
    let patterns = [
        format!("replace = \"{}\"", token),
        format!("replace=\"{}\"", token),
        format!("replace = '{}'", token),
        format!("\"replace\": \"{}\"", token),
        format!("\"replace\":\"{}\"", token),
    ];

    let mut spans: Vec<SourceSpan> = Vec::new();
    for pattern in &patterns {
        // The token always sits just before the closing quote
        let skip = pattern.len() - token.len() - 1;
        let mut start = 0;
        while let Some(pos) = src[start..].find(pattern.as_str()) {
            let abs = start + pos;
            spans.push(SourceSpan::from((abs + skip, token.len())));
            start = abs + pattern.len();
        }
    }

    spans.sort_by_key(|s| s.offset());
    spans
}

/// Reject duplicate, self-referencing and chained renames in one category.
///
/// `entries` must be in order of introduction.
pub(crate) fn check_renames(
    category: Category,
    entries: &[ChangeEntry],
    source: &SourceContext,
) -> Result<()> {
    let mut seen: HashMap<&str, &ChangeEntry> = HashMap::new();

    for entry in entries {
        if entry.replace_with.is_empty() {
            let span = find_replace_spans(source.src(), &entry.replace)
                .first()
                .copied();
            return Err(source.validation_error(
                format!("{} entry '{}' has an empty replacement", category, entry.replace),
                span,
            ));
        }

        if entry.replace == entry.replace_with {
            let span = find_replace_spans(source.src(), &entry.replace)
                .first()
                .copied();
            return Err(source.validation_error(
                format!(
                    "{} entry '{}' renames a token to itself",
                    category, entry.replace
                ),
                span,
            ));
        }

        if let Some(first) = seen.get(entry.replace.as_str()) {
            return Err(source.duplicate_error(category, &entry.replace, &first.pr, &entry.pr));
        }
        seen.insert(&entry.replace, entry);
    }

    for entry in entries {
        if let Some(next) = seen.get(entry.replace_with.as_str()) {
            return Err(source.chain_error(
                category,
                &entry.replace,
                &entry.replace_with,
                &next.replace_with,
            ));
        }
    }

    Ok(())
}
