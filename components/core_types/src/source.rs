//! Source position and span types for diagnostic tracking.
//!
//! Lines and columns are 0-based throughout the pipeline; only user-facing
//! error strings add 1 to the line number.

/// Represents a position in source code.
///
/// Used by diagnostics, hot comments, and bytecode debug info to indicate
/// where in the source something occurred.
///
/// # Examples
///
/// ```
/// use core_types::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.line, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// Line number (0-based)
    pub line: u32,
    /// Column number (0-based)
    pub column: u32,
}

impl Position {
    /// Create a new position
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A half-open region of source text, from `begin` up to `end`.
///
/// # Examples
///
/// ```
/// use core_types::{Position, Span};
///
/// let span = Span::new(Position::new(2, 0), Position::new(2, 9));
/// assert!(span.begin <= span.end);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// First position covered by the span
    pub begin: Position,
    /// Position one past the last covered character
    pub end: Position,
}

impl Span {
    /// Create a new span
    pub fn new(begin: Position, end: Position) -> Self {
        Self { begin, end }
    }

    /// Create a zero-width span at a single position
    pub fn at(position: Position) -> Self {
        Self {
            begin: position,
            end: position,
        }
    }

    /// Create a span covering both `self` and `other`
    pub fn merge(self, other: Span) -> Span {
        Span {
            begin: self.begin.min(other.begin),
            end: self.end.max(other.end),
        }
    }
}
