//! Compile-time error type.

use crate::Span;
use thiserror::Error;

/// A compile-time failure with a source location.
///
/// Unlike parse [`Diagnostic`](crate::Diagnostic)s, which are collected, a
/// `CompileError` aborts bytecode generation. It is caught at the boundary
/// and reformatted as `":<line+1>: <message>"`, matching the failed-parse
/// report convention.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CompileError {
    /// Source region the failure refers to
    pub span: Span,
    /// Human-readable message
    pub message: String,
}

impl CompileError {
    /// Create a new compile error
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}
