//! Diagnostic and hot-comment records produced by parsing.

use crate::Span;

/// A recoverable parse failure.
///
/// Parsing never throws; every failure is collected as a `Diagnostic` in the
/// parse result, in source order. The first diagnostic is the one reported by
/// single-error consumers such as compilation.
///
/// # Examples
///
/// ```
/// use core_types::{Diagnostic, Position, Span};
///
/// let diag = Diagnostic::new(
///     Span::at(Position::new(1, 10)),
///     "Expected identifier when parsing expression".to_string(),
/// );
/// assert_eq!(diag.span.begin.line, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Source region the failure refers to
    pub span: Span,
    /// Human-readable message
    pub message: String,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(span: Span, message: String) -> Self {
        Self { span, message }
    }
}

/// A `--!` directive comment captured during parsing.
///
/// Hot comments carry directives to the compiler (e.g. `--!strict`). A hot
/// comment is a *header* comment when it appears before the first
/// non-comment token of the source; only header comments are honored by the
/// compiler, but all of them are recorded in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotComment {
    /// True when the comment precedes the first non-comment token
    pub header: bool,
    /// Source region of the comment, including the `--!` introducer
    pub span: Span,
    /// Directive text after the `--!` introducer, untrimmed
    pub text: String,
}
