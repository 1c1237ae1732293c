//! Core types shared across the Lumen compiler pipeline.
//!
//! This crate provides the foundational types used by the lexer, parser,
//! bytecode generator, and the C boundary: source locations, diagnostics,
//! hot comments, compile errors, the process-wide feature-flag registry,
//! and the assertion hook.
//!
//! # Overview
//!
//! - [`Position`] / [`Span`] - Source code locations (0-based)
//! - [`Diagnostic`] - A recoverable parse failure with location and message
//! - [`HotComment`] - A `--!` directive comment captured during parsing
//! - [`CompileError`] - A compile-time failure with location and message
//! - [`flags`] - The process-wide typed feature-flag registry
//! - [`assert`] - The replaceable assertion-failure handler
//!
//! # Examples
//!
//! ```
//! use core_types::{Diagnostic, Position, Span};
//!
//! let span = Span::new(Position::new(1, 10), Position::new(1, 11));
//! let diag = Diagnostic::new(span, "Expected identifier".to_string());
//! assert_eq!(diag.span.begin.line, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assert;
mod compile_error;
mod diagnostic;
pub mod flags;
mod source;

pub use compile_error::CompileError;
pub use diagnostic::{Diagnostic, HotComment};
pub use flags::{FlagKind, FlagRegistry};
pub use source::{Position, Span};
