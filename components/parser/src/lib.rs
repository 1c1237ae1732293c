//! Lumen Parser Component
//!
//! Provides the arena, name interner, lexer, recursive descent parser, and
//! bytecode generation for the Lumen language.
//!
//! # Overview
//!
//! - [`Arena`] - Index-pool allocator owning every AST node and interned name
//! - [`NameInterner`] - Deduplicating name table bound to one arena
//! - [`Lexer`] / [`Lexeme`] - Pull-based token scanner with config toggles
//! - [`Parser`] - Recursive descent parser collecting diagnostics
//! - [`ParseResult`] - Root block, diagnostics, and hot comments
//! - [`query`] - Native-function detection over the tree
//! - [`BytecodeGenerator`] - Converts a parse result to a bytecode module
//!
//! # Example
//!
//! ```
//! use parser::{parse, Arena, NameInterner};
//!
//! let mut arena = Arena::new();
//! let mut interner = NameInterner::new(&arena);
//! let result = parse("local x = 1", &mut interner, &mut arena);
//! assert!(result.diagnostics.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod arena;
pub mod ast;
pub mod bytecode_gen;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod query;

mod interner;

pub use arena::{Arena, NameId, NodeRef};
pub use ast::{AstNode, BinaryOp, UnaryOp};
pub use bytecode_gen::{compile, BytecodeGenerator, CompileOptions};
pub use interner::NameInterner;
pub use lexer::{Keyword, Lexeme, LexemeKind, Lexer, Punct};
pub use parser::{parse, ParseResult, Parser};
