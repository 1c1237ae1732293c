//! Lumen C Boundary Component
//!
//! A flat, ABI-stable C interface over the compilation pipeline: opaque
//! handles for arenas, name interners, lexeme cursors, and parse results,
//! plus plain-old-data structs for everything that crosses by value. Every
//! allocation-returning entry point has exactly one paired free; calling a
//! free twice, or on memory another constructor produced, is undefined
//! behavior on the caller's side.
//!
//! # Overview
//!
//! - [`handles`] - Arena and name-interner lifecycle
//! - [`cursor`] - Standalone pull-based token scanner
//! - [`parse`] - Parse pipeline and native-attribute query
//! - [`marshal`] - Diagnostics and hot comments as flat caller-owned arrays
//! - [`compile`] - Bytecode compilation with a tagged success/error result
//! - [`flags`] - Process-wide typed flag registry bridge
//! - [`diag`] - Assertion reporting hook
//!
//! No entry point panics across the boundary for recoverable conditions;
//! parse failures become diagnostics, compile failures become formatted
//! error payloads, and flag lookup misses become boolean returns.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod alloc;

pub mod compile;
pub mod cursor;
pub mod diag;
pub mod flags;
pub mod handles;
pub mod marshal;
pub mod parse;

pub use alloc::live_buffer_count;
pub use compile::{lumen_compile, lumen_compile_free, CompileOptions, CompileResult};
pub use cursor::{
    lumen_lexeme_to_string, lumen_lexer_free, lumen_lexer_new, lumen_lexer_next,
    lumen_lexer_set_read_names, lumen_lexer_set_skip_comments, LexemeCursor,
};
pub use diag::lumen_install_assertion_handler;
pub use flags::{
    lumen_flag_get_bool, lumen_flag_get_int, lumen_flag_set_bool, lumen_flag_set_int,
    lumen_flags_free, lumen_flags_list, FlagArray,
};
pub use handles::{lumen_arena_free, lumen_arena_new, lumen_interner_free, lumen_interner_new};
pub use marshal::{
    lumen_parseresult_free_errors, lumen_parseresult_free_hotcomments,
    lumen_parseresult_get_errors, lumen_parseresult_get_hotcomments, ErrorArray, ErrorRecord,
    HotCommentArray, HotCommentRecord, Position, Span,
};
pub use parse::{
    lumen_parse, lumen_parseresult_free, lumen_parseresult_has_native_function, ParseResultHandle,
};

use alloc::free_bytes;

/// An owned byte buffer crossing the boundary: pointer plus explicit
/// length, no terminator.
#[repr(C)]
pub struct Buffer {
    /// Buffer bytes, non-null even when `len` is zero
    pub data: *mut u8,
    /// Byte length of `data`
    pub len: usize,
}

/// Release a buffer produced by a boundary entry point that documents this
/// as its paired free.
///
/// # Safety
///
/// `buffer` must come from a single producing call and must not have been
/// freed already.
#[no_mangle]
pub unsafe extern "C" fn lumen_buffer_free(buffer: Buffer) {
    free_bytes(buffer.data, buffer.len);
}
