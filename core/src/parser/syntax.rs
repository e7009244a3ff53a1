// Common syntax structures shared by the parser and its errors.

use core::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span(pub Range<usize>);

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self(start..end)
    }
    pub fn str_of<'a>(&self, source: &'a str) -> &'a str {
        &source[self.0.start..self.0.end]
    }
}

impl From<pest::Span<'_>> for Span {
    fn from(s: pest::Span<'_>) -> Self {
        Self(s.start()..s.end())
    }
}

/// A parsed value together with the number of input bytes it consumed.
///
/// The schema language is ASCII, so this is also the number of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parsed<T> {
    pub value: T,
    pub len: usize,
}

impl<T> Parsed<T> {
    pub fn new(value: T, len: usize) -> Self {
        Self { value, len }
    }
}
