use std::ops::Range;

use serde::Serialize;

/// A byte range in a source file, expressed as start offset and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Create a span covering `start..end`.
    pub fn from_range(start: usize, end: usize) -> Self {
        Self {
            start,
            len: end.saturating_sub(start),
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Shift the span by a base offset (used for embedded templates and styles).
    pub fn offset(self, base: usize) -> Self {
        Self {
            start: self.start + base,
            len: self.len,
        }
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::from_range(range.start, range.end)
    }
}
