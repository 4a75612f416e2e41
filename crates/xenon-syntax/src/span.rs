//! Source locations.
//!
//! Every token, AST node and static error carries a [`Span`]. Byte offsets
//! slice the source for lexemes; line and column drive diagnostics.
//!
//! ```
//! use xenon_syntax::span::Span;
//!
//! let class_kw = Span::new(0, 5, 1, 1, 1, 6);
//! let brace = Span::new(14, 15, 1, 15, 1, 16);
//! let whole = Span::merge(class_kw, brace);
//!
//! assert_eq!(whole.start, 0);
//! assert_eq!(whole.end, 15);
//! assert_eq!(whole.to_string(), "1:1");
//! ```

use std::fmt;

/// A half-open byte range with the 1-based line/column of both ends.
///
/// Columns count characters, not bytes, so carets line up under non-ASCII
/// text in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Byte offset of the first byte
    pub start: usize,

    /// Byte offset one past the last byte
    pub end: usize,

    /// Line of `start` (1-based)
    pub start_line: usize,

    /// Column of `start` (1-based)
    pub start_col: usize,

    /// Line of `end` (1-based)
    pub end_line: usize,

    /// Column of `end` (1-based)
    pub end_col: usize,
}

impl Span {
    /// Builds a span from offsets and positions.
    #[must_use]
    pub const fn new(
        start: usize,
        end: usize,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start,
            end,
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// A zero-width span at one position, used for end of input.
    ///
    /// ```
    /// use xenon_syntax::span::Span;
    ///
    /// let eof = Span::point(40, 3, 2);
    /// assert!(eof.is_empty());
    /// assert_eq!(eof.to_string(), "3:2");
    /// ```
    #[must_use]
    pub const fn point(offset: usize, line: usize, col: usize) -> Self {
        Self::new(offset, offset, line, col, line, col)
    }

    /// Covers everything from the start of `left` to the end of `right`.
    #[must_use]
    pub const fn merge(left: Span, right: Span) -> Self {
        Self {
            start: left.start,
            end: right.end,
            start_line: left.start_line,
            start_col: left.start_col,
            end_line: right.end_line,
            end_col: right.end_col,
        }
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` for zero-width spans.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The source text covered by this span, if it lies inside `source`.
    #[must_use]
    pub fn slice<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(self.start..self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// Anything that knows where it came from in the source.
pub trait Spanned {
    /// Returns the source span of this item.
    fn span(&self) -> Span;
}

impl Spanned for Span {
    fn span(&self) -> Span {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge_across_lines() {
        let left = Span::new(0, 5, 1, 1, 1, 6);
        let right = Span::new(30, 31, 3, 1, 3, 2);
        let merged = Span::merge(left, right);

        assert_eq!(merged.start, 0);
        assert_eq!(merged.end, 31);
        assert_eq!(merged.start_line, 1);
        assert_eq!(merged.end_line, 3);
        assert_eq!(merged.end_col, 2);
    }

    #[test]
    fn test_span_len_and_empty() {
        assert_eq!(Span::new(4, 9, 1, 5, 1, 10).len(), 5);
        assert!(Span::point(4, 1, 5).is_empty());
    }

    #[test]
    fn test_span_slice() {
        let source = "var id: int = 101;";
        let span = Span::new(4, 6, 1, 5, 1, 7);
        assert_eq!(span.slice(source), Some("id"));
        assert_eq!(Span::new(40, 42, 1, 1, 1, 3).slice(source), None);
    }

    #[test]
    fn test_span_display_is_start_position() {
        let span = Span::new(0, 10, 5, 10, 5, 20);
        assert_eq!(format!("{span}"), "5:10");
    }
}
