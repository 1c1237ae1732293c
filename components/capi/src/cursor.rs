//! Standalone lexeme cursor
//!
//! Wraps a lexer together with a private arena and interner so tokens can be
//! pulled without setting up the full parse pipeline. `next` returns a
//! borrowed view valid until the next `next` call or cursor destruction.

use crate::alloc::alloc_bytes;
use crate::Buffer;
use parser::{Arena, Lexeme, Lexer, NameInterner};

/// A pull-based token scanner with its own arena and name table.
///
/// The source text is copied in at construction; invalid UTF-8 byte
/// sequences are replaced.
pub struct LexemeCursor {
    arena: Arena,
    interner: NameInterner,
    lexer: Lexer,
}

/// Build a cursor over `len` bytes at `source`.
///
/// # Safety
///
/// `source` must point to `len` readable bytes. The bytes are copied; the
/// caller's buffer may be released immediately after this call returns.
#[no_mangle]
pub unsafe extern "C" fn lumen_lexer_new(source: *const u8, len: usize) -> *mut LexemeCursor {
    let bytes = std::slice::from_raw_parts(source, len);
    let source = String::from_utf8_lossy(bytes);
    let arena = Arena::new();
    let interner = NameInterner::new(&arena);
    let lexer = Lexer::new(&source);

    Box::into_raw(Box::new(LexemeCursor {
        arena,
        interner,
        lexer,
    }))
}

/// Release a cursor and its private arena and interner.
///
/// # Safety
///
/// `cursor` must come from [`lumen_lexer_new`] and must not be used again.
/// Lexeme views returned by [`lumen_lexer_next`] become invalid.
#[no_mangle]
pub unsafe extern "C" fn lumen_lexer_free(cursor: *mut LexemeCursor) {
    if !cursor.is_null() {
        drop(Box::from_raw(cursor));
    }
}

/// Configure whether comments are skipped (nonzero) or surfaced as lexemes.
/// Affects subsequent [`lumen_lexer_next`] calls only; last write wins.
///
/// # Safety
///
/// `cursor` must be a live handle from [`lumen_lexer_new`].
#[no_mangle]
pub unsafe extern "C" fn lumen_lexer_set_skip_comments(cursor: *mut LexemeCursor, skip: bool) {
    (*cursor).lexer.set_skip_comments(skip);
}

/// Configure whether identifiers are interned into the cursor's private name
/// table. Affects subsequent [`lumen_lexer_next`] calls only.
///
/// # Safety
///
/// `cursor` must be a live handle from [`lumen_lexer_new`].
#[no_mangle]
pub unsafe extern "C" fn lumen_lexer_set_read_names(cursor: *mut LexemeCursor, read: bool) {
    (*cursor).lexer.set_read_names(read);
}

/// Advance by exactly one lexeme and return a borrowed view of it.
///
/// The view stays valid until the next `lumen_lexer_next` call on the same
/// cursor or until the cursor is freed; callers needing the token past that
/// point must copy it out first, for example via
/// [`lumen_lexeme_to_string`].
///
/// # Safety
///
/// `cursor` must be a live handle from [`lumen_lexer_new`].
#[no_mangle]
pub unsafe extern "C" fn lumen_lexer_next(cursor: *mut LexemeCursor) -> *const Lexeme {
    let cursor = &mut *cursor;
    cursor.lexer.next(&mut cursor.arena, &mut cursor.interner)
}

/// Render a human-readable form of a lexeme into a fresh caller-owned
/// buffer. Release it with [`lumen_buffer_free`](crate::lumen_buffer_free).
///
/// # Safety
///
/// `lexeme` must be a view obtained from [`lumen_lexer_next`] whose cursor
/// is still live and has not been advanced since.
#[no_mangle]
pub unsafe extern "C" fn lumen_lexeme_to_string(lexeme: *const Lexeme) -> Buffer {
    let rendered = (*lexeme).to_display_string();
    let (data, len) = alloc_bytes(rendered.as_bytes());
    Buffer { data, len }
}
