//! Unit tests for source positions and spans

use core_types::{Position, Span};

#[test]
fn test_position_creation() {
    let pos = Position::new(10, 5);
    assert_eq!(pos.line, 10);
    assert_eq!(pos.column, 5);
}

#[test]
fn test_position_is_copy() {
    let pos = Position::new(1, 2);
    let copied = pos;
    assert_eq!(pos, copied);
}

#[test]
fn test_span_covers_range() {
    let span = Span::new(Position::new(1, 0), Position::new(1, 10));
    assert_eq!(span.begin.column, 0);
    assert_eq!(span.end.column, 10);
}

#[test]
fn test_span_merge_is_commutative() {
    let a = Span::new(Position::new(0, 0), Position::new(0, 5));
    let b = Span::new(Position::new(2, 0), Position::new(2, 3));
    assert_eq!(a.merge(b), b.merge(a));
}
