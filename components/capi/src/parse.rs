//! Parse pipeline entry points
//!
//! `lumen_parse` always returns a result handle: failures become diagnostics
//! inside it, never cross-boundary panics. The handle remembers which arena
//! the tree lives in so later queries and compilation can reach the nodes;
//! the arena must stay alive for as long as the handle is used.

use parser::{parse, query, Arena, NameInterner, ParseResult};

/// An owned parse outcome: root tree reference, diagnostics, and hot
/// comments. Tree nodes themselves are owned by the arena the source was
/// parsed into, so freeing this handle leaves the tree intact.
pub struct ParseResultHandle {
    pub(crate) result: ParseResult,
    pub(crate) arena: *const Arena,
}

/// Parse `len` bytes at `source` into `arena`, interning names through
/// `interner`.
///
/// A tree is always produced, possibly partial; syntax errors are collected
/// as diagnostics on the returned handle in source order.
///
/// # Safety
///
/// `source` must point to `len` readable bytes. `interner` and `arena` must
/// be live handles, with `interner` bound to `arena`. The arena must stay
/// alive for every later use of the returned handle.
#[no_mangle]
pub unsafe extern "C" fn lumen_parse(
    source: *const u8,
    len: usize,
    interner: *mut NameInterner,
    arena: *mut Arena,
) -> *mut ParseResultHandle {
    let bytes = std::slice::from_raw_parts(source, len);
    let text = String::from_utf8_lossy(bytes);
    let result = parse(&text, &mut *interner, &mut *arena);
    log::debug!(
        "parsed {} bytes: {} diagnostics, {} hot comments",
        len,
        result.diagnostics.len(),
        result.hot_comments.len()
    );
    Box::into_raw(Box::new(ParseResultHandle {
        result,
        arena: arena as *const Arena,
    }))
}

/// Release a parse-result handle. Tree nodes stay alive in their arena.
///
/// # Safety
///
/// `handle` must come from [`lumen_parse`] and must not be used again.
#[no_mangle]
pub unsafe extern "C" fn lumen_parseresult_free(handle: *mut ParseResultHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

/// Report whether the parsed tree contains any function literal carrying
/// the `@native` attribute. Read-only; visits every nested function exactly
/// once.
///
/// # Safety
///
/// `handle` must be a live handle from [`lumen_parse`] whose arena is still
/// alive.
#[no_mangle]
pub unsafe extern "C" fn lumen_parseresult_has_native_function(
    handle: *const ParseResultHandle,
) -> bool {
    let handle = &*handle;
    query::has_native_function(&*handle.arena, &handle.result)
}
