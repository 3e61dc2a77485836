//! Batch application of replacements to one file.

use matmig_core::Span;
use thiserror::Error;

use crate::Replacement;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixError {
    #[error("replacements overlap at {}..{} and {}..{}", first.start, first.end(), second.start, second.end())]
    Overlap { first: Span, second: Span },

    #[error("replacement at {}..{} is outside the source", span.start, span.end())]
    OutOfBounds { span: Span },
}

/// Apply all replacements for one file in a single batch.
///
/// Every replacement is positioned against the original `source`, so order
/// of application never shifts offsets. Identical replacements are applied
/// once. Overlapping replacements that differ are rejected and nothing is
/// applied.
pub fn apply_replacements<'a>(
    source: &str,
    replacements: impl IntoIterator<Item = &'a Replacement>,
) -> Result<String, FixError> {
    let mut sorted: Vec<&Replacement> = replacements.into_iter().collect();
    sorted.sort_by(|a, b| {
        (a.position, a.length, &a.replacement_text).cmp(&(b.position, b.length, &b.replacement_text))
    });
    sorted.dedup();

    for pair in sorted.windows(2) {
        let (first, second) = (pair[0].span(), pair[1].span());
        if first.overlaps(&second) || (first == second) {
            return Err(FixError::Overlap { first, second });
        }
    }

    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;
    for replacement in sorted {
        let span = replacement.span();
        if span.end() > source.len()
            || !source.is_char_boundary(span.start)
            || !source.is_char_boundary(span.end())
        {
            return Err(FixError::OutOfBounds { span });
        }
        output.push_str(&source[cursor..span.start]);
        output.push_str(&replacement.replacement_text);
        cursor = span.end();
    }
    output.push_str(&source[cursor..]);

    Ok(output)
}
