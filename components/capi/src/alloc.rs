//! Owned byte buffers crossing the boundary, with allocation accounting
//!
//! Every buffer handed to the caller comes from [`alloc_bytes`] and must be
//! returned through [`free_bytes`]. A live-allocation counter backs the
//! ownership round-trip tests; it has no effect on behavior.
//!
//! Zero-length buffers use a well-aligned dangling pointer rather than null,
//! so "empty" and "absent" stay distinguishable. Freeing a zero-length
//! buffer is a no-op.

use std::ptr::NonNull;
use std::sync::atomic::{AtomicIsize, Ordering};

static LIVE_BUFFERS: AtomicIsize = AtomicIsize::new(0);

/// Number of boundary-owned buffers currently outstanding.
///
/// Test instrumentation; producers increment it, the paired frees decrement
/// it.
pub fn live_buffer_count() -> isize {
    LIVE_BUFFERS.load(Ordering::SeqCst)
}

/// Copy `data` into a caller-owned heap buffer, returning the pointer and
/// length. Empty input yields a non-null dangling pointer with length zero.
pub(crate) fn alloc_bytes(data: &[u8]) -> (*mut u8, usize) {
    if data.is_empty() {
        return (NonNull::dangling().as_ptr(), 0);
    }
    let boxed: Box<[u8]> = data.into();
    LIVE_BUFFERS.fetch_add(1, Ordering::SeqCst);
    (Box::into_raw(boxed) as *mut u8, data.len())
}

/// Release a buffer produced by [`alloc_bytes`].
///
/// # Safety
///
/// `ptr` and `len` must come from a single [`alloc_bytes`] call and must not
/// have been freed already.
pub(crate) unsafe fn free_bytes(ptr: *mut u8, len: usize) {
    if len == 0 || ptr.is_null() {
        return;
    }
    drop(Box::from_raw(std::ptr::slice_from_raw_parts_mut(ptr, len)));
    LIVE_BUFFERS.fetch_sub(1, Ordering::SeqCst);
}

/// Move a vector of records into a caller-owned array, returning the pointer
/// and element count. Empty input yields a non-null dangling pointer.
pub(crate) fn alloc_array<T>(values: Vec<T>) -> (*mut T, usize) {
    if values.is_empty() {
        return (NonNull::dangling().as_ptr(), 0);
    }
    let count = values.len();
    let boxed: Box<[T]> = values.into_boxed_slice();
    LIVE_BUFFERS.fetch_add(1, Ordering::SeqCst);
    (Box::into_raw(boxed) as *mut T, count)
}

/// Reclaim an array produced by [`alloc_array`], returning its elements so
/// the caller can release per-element buffers.
///
/// # Safety
///
/// `ptr` and `count` must come from a single [`alloc_array`] call and must
/// not have been freed already.
pub(crate) unsafe fn free_array<T>(ptr: *mut T, count: usize) -> Vec<T> {
    if count == 0 || ptr.is_null() {
        return Vec::new();
    }
    let boxed = Box::from_raw(std::ptr::slice_from_raw_parts_mut(ptr, count));
    LIVE_BUFFERS.fetch_sub(1, Ordering::SeqCst);
    boxed.into_vec()
}
