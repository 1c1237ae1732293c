//! Parser diagnostic helpers

use crate::lexer::Lexeme;
use core_types::{Diagnostic, Span};

/// Create a syntax diagnostic at a given span
pub fn syntax_error(span: Span, message: impl Into<String>) -> Diagnostic {
    Diagnostic::new(span, message.into())
}

/// Create an "expected expression" diagnostic at the offending lexeme
pub fn expected_expression(got: &Lexeme) -> Diagnostic {
    syntax_error(
        got.span,
        format!("Expected expression, got {}", got.to_display_string()),
    )
}

/// Create an "expected X, got Y" diagnostic at the offending lexeme
pub fn expected_token(expected: &str, got: &Lexeme) -> Diagnostic {
    syntax_error(
        got.span,
        format!("Expected {}, got {}", expected, got.to_display_string()),
    )
}

/// Create an "expected X to close Y" diagnostic at the offending lexeme
pub fn expected_closing(expected: &str, construct: &str, got: &Lexeme) -> Diagnostic {
    syntax_error(
        got.span,
        format!(
            "Expected {} to close {}, got {}",
            expected,
            construct,
            got.to_display_string()
        ),
    )
}
