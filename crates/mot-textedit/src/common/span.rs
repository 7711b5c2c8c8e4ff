//! Byte ranges into a script file

use std::ops::Range;

/// Half-open byte range `start..end` into a source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Move a span that is relative to a line so it becomes relative to the file
    pub fn offset_by(self, base: usize) -> Self {
        Self::new(self.start + base, self.end + base)
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}
