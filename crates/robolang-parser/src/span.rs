//! Source locations.
//!
//! A [`Span`] is a byte range into the source text and is what diagnostic
//! labels point at. A [`Position`] is the human-facing 1-based line and
//! column of the first character of a token.

use std::{fmt, ops::Range};

/// A half-open byte range `[start, end)` in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range)
    }
}

/// A 1-based line and column in the source text.
///
/// Columns count characters, not bytes. A `\r` that is immediately followed
/// by `\n` is part of the line terminator and does not take up a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    line: u32,
    column: u32,
}

impl Position {
    /// Create a position. Both `line` and `column` are clamped to at least 1.
    pub fn new(line: u32, column: u32) -> Self {
        Self {
            line: line.max(1),
            column: column.max(1),
        }
    }

    /// The line, starting at 1.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The column, starting at 1.
    pub fn column(&self) -> u32 {
        self.column
    }

    /// The position at the start of any source text.
    pub fn start() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Incremental line/column tracker over a source string.
///
/// The lexer advances it over every piece of text it consumes, trivia
/// included, so token positions never need a second pass.
#[derive(Debug, Clone)]
pub(crate) struct LineTracker<'src> {
    source: &'src str,
    offset: usize,
    position: Position,
}

impl<'src> LineTracker<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            position: Position::start(),
        }
    }

    /// Position of the next unconsumed character.
    pub(crate) fn position(&self) -> Position {
        self.position
    }

    /// Move the tracker forward to byte offset `end`.
    pub(crate) fn advance_to(&mut self, end: usize) {
        let source = self.source;
        let Some(text) = source.get(self.offset..end) else {
            return;
        };
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\n' => {
                    self.position.line += 1;
                    self.position.column = 1;
                }
                // The last `\r` of the range looks past it for the `\n`.
                '\r' if chars
                    .peek()
                    .map_or_else(|| source[end..].starts_with('\n'), |next| *next == '\n') => {}
                _ => self.position.column += 1,
            }
        }
        self.offset = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basic_functionality() {
        let span = Span::new(5..10);
        assert_eq!(span.start(), 5);
        assert_eq!(span.end(), 10);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_span_empty() {
        let span = Span::new(5..5);
        assert_eq!(span.len(), 0);
        assert!(span.is_empty());
    }

    #[test]
    fn test_position_is_never_zero() {
        let position = Position::new(0, 0);
        assert_eq!(position.line(), 1);
        assert_eq!(position.column(), 1);
        assert_eq!(position.to_string(), "1:1");
    }

    #[test]
    fn test_tracker_counts_lines_and_columns() {
        let source = "ab\ncd";
        let mut tracker = LineTracker::new(source);

        tracker.advance_to(1);
        assert_eq!(tracker.position(), Position::new(1, 2));

        tracker.advance_to(3);
        assert_eq!(tracker.position(), Position::new(2, 1));

        tracker.advance_to(5);
        assert_eq!(tracker.position(), Position::new(2, 3));
    }

    #[test]
    fn test_tracker_crlf_takes_no_column() {
        let source = "a\r\nb";
        let mut tracker = LineTracker::new(source);

        // Stop between `\r` and `\n`.
        tracker.advance_to(2);
        assert_eq!(tracker.position(), Position::new(1, 2));

        tracker.advance_to(3);
        assert_eq!(tracker.position(), Position::new(2, 1));
    }

    #[test]
    fn test_tracker_lone_carriage_return_takes_a_column() {
        let source = "a\rb";
        let mut tracker = LineTracker::new(source);

        tracker.advance_to(2);
        assert_eq!(tracker.position(), Position::new(1, 3));
    }

    #[test]
    fn test_tracker_counts_characters_not_bytes() {
        let source = "ñá x";
        let mut tracker = LineTracker::new(source);

        tracker.advance_to("ñá ".len());
        assert_eq!(tracker.position(), Position::new(1, 4));
    }
}
