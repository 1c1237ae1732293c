//! Opaque arena and name-interner handles
//!
//! Handles are boxed host objects exposed as non-dereferenceable pointers.
//! Each `_new` has exactly one paired `_free`; an arena must outlive every
//! interner and parse result bound to it.

use parser::{Arena, NameInterner};

/// Allocate a fresh arena. Every parse-tree node and interned name produced
/// against this handle lives inside it until [`lumen_arena_free`].
#[no_mangle]
pub extern "C" fn lumen_arena_new() -> *mut Arena {
    Box::into_raw(Box::new(Arena::new()))
}

/// Release an arena and everything allocated from it.
///
/// # Safety
///
/// `arena` must come from [`lumen_arena_new`] and must not be used again.
/// Interners and parse results bound to it become invalid.
#[no_mangle]
pub unsafe extern "C" fn lumen_arena_free(arena: *mut Arena) {
    if !arena.is_null() {
        drop(Box::from_raw(arena));
    }
}

/// Bind a new name interner to `arena`.
///
/// # Safety
///
/// `arena` must be a live handle from [`lumen_arena_new`] and must outlive
/// the returned interner.
#[no_mangle]
pub unsafe extern "C" fn lumen_interner_new(arena: *const Arena) -> *mut NameInterner {
    let arena = &*arena;
    Box::into_raw(Box::new(NameInterner::new(arena)))
}

/// Release an interner's bookkeeping. The arena it was bound to is not
/// touched.
///
/// # Safety
///
/// `interner` must come from [`lumen_interner_new`] and must not be used
/// again.
#[no_mangle]
pub unsafe extern "C" fn lumen_interner_free(interner: *mut NameInterner) {
    if !interner.is_null() {
        drop(Box::from_raw(interner));
    }
}
