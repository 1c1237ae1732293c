//! Contract compliance tests for core_types
//!
//! Verifies the shapes other components and the C boundary rely on.

use core_types::{CompileError, Diagnostic, FlagKind, HotComment, Position, Span};

/// Contract: Position is two public u32 fields, line then column
#[test]
fn test_contract_position_fields() {
    let pos = Position { line: 3, column: 9 };
    let _line: u32 = pos.line;
    let _column: u32 = pos.column;
}

/// Contract: Span is a begin/end pair of positions
#[test]
fn test_contract_span_fields() {
    let span = Span {
        begin: Position::new(0, 0),
        end: Position::new(0, 1),
    };
    let _begin: Position = span.begin;
    let _end: Position = span.end;
}

/// Contract: Diagnostic carries a span and an owned message
#[test]
fn test_contract_diagnostic_fields() {
    let diag = Diagnostic::new(Span::at(Position::new(0, 0)), String::new());
    let _span: Span = diag.span;
    let _message: String = diag.message;
}

/// Contract: HotComment carries header flag, span, and owned text
#[test]
fn test_contract_hot_comment_fields() {
    let hc = HotComment {
        header: false,
        span: Span::at(Position::new(0, 0)),
        text: String::new(),
    };
    let _header: bool = hc.header;
    let _text: String = hc.text;
}

/// Contract: CompileError displays as its bare message (the boundary adds
/// the ":<line+1>: " prefix itself)
#[test]
fn test_contract_compile_error_display() {
    let err = CompileError::new(Span::at(Position::new(9, 0)), "too many registers");
    assert_eq!(format!("{}", err), "too many registers");
}

/// Contract: flag kind tags are 0 = boolean, 1 = integer, nothing else
#[test]
fn test_contract_flag_kind_values() {
    assert_eq!(FlagKind::Bool as i32, 0);
    assert_eq!(FlagKind::Int as i32, 1);
}
