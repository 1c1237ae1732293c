//! Flag registry bridge
//!
//! Exposes the process-wide typed flag registry: get/set by exact name and
//! bulk enumeration into caller-owned parallel arrays. Unknown names report
//! failure through the boolean return and leave out-parameters untouched.

use crate::alloc::{alloc_array, alloc_bytes, free_array, free_bytes};
use crate::Buffer;
use core_types::flags;

/// Enumerated flags: parallel name and kind arrays. Kind 0 is boolean,
/// kind 1 is integer; booleans always precede integers.
#[repr(C)]
pub struct FlagArray {
    /// One owned name buffer per flag, non-null even when `count` is zero
    pub names: *mut Buffer,
    /// One kind tag per flag, parallel to `names`
    pub kinds: *mut i32,
    /// Number of flags
    pub count: usize,
}

unsafe fn flag_name(name: *const u8, len: usize) -> String {
    let bytes = std::slice::from_raw_parts(name, len);
    String::from_utf8_lossy(bytes).into_owned()
}

/// Set a boolean flag by exact name. Returns false when no boolean flag has
/// that name.
///
/// # Safety
///
/// `name` must point to `len` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn lumen_flag_set_bool(name: *const u8, len: usize, value: bool) -> bool {
    flags::registry().set_bool(&flag_name(name, len), value)
}

/// Read a boolean flag by exact name into `out`. Returns false and leaves
/// `out` untouched when no boolean flag has that name.
///
/// # Safety
///
/// `name` must point to `len` readable bytes and `out` must be writable.
#[no_mangle]
pub unsafe extern "C" fn lumen_flag_get_bool(
    name: *const u8,
    len: usize,
    out: *mut bool,
) -> bool {
    match flags::registry().get_bool(&flag_name(name, len)) {
        Some(value) => {
            *out = value;
            true
        }
        None => false,
    }
}

/// Set an integer flag by exact name. Returns false when no integer flag
/// has that name.
///
/// # Safety
///
/// `name` must point to `len` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn lumen_flag_set_int(name: *const u8, len: usize, value: i32) -> bool {
    flags::registry().set_int(&flag_name(name, len), value)
}

/// Read an integer flag by exact name into `out`. Returns false and leaves
/// `out` untouched when no integer flag has that name.
///
/// # Safety
///
/// `name` must point to `len` readable bytes and `out` must be writable.
#[no_mangle]
pub unsafe extern "C" fn lumen_flag_get_int(name: *const u8, len: usize, out: *mut i32) -> bool {
    match flags::registry().get_int(&flag_name(name, len)) {
        Some(value) => {
            *out = value;
            true
        }
        None => false,
    }
}

/// Enumerate every registered flag into caller-owned parallel arrays, all
/// booleans first, then all integers, each group in registration order.
/// The arrays are sized exactly to the flag count, with no trailing
/// sentinel. Release with [`lumen_flags_free`].
#[no_mangle]
pub extern "C" fn lumen_flags_list() -> FlagArray {
    let entries = flags::registry().list();
    let mut names = Vec::with_capacity(entries.len());
    let mut kinds = Vec::with_capacity(entries.len());
    for (name, kind) in entries {
        let (data, len) = alloc_bytes(name.as_bytes());
        names.push(Buffer { data, len });
        kinds.push(kind as i32);
    }
    let (names, count) = alloc_array(names);
    let (kinds, _) = alloc_array(kinds);
    FlagArray {
        names,
        kinds,
        count,
    }
}

/// Release arrays produced by [`lumen_flags_list`], including every
/// duplicated name buffer.
///
/// # Safety
///
/// `array` must come from a single [`lumen_flags_list`] call and must not
/// have been freed already.
#[no_mangle]
pub unsafe extern "C" fn lumen_flags_free(array: FlagArray) {
    for name in free_array(array.names, array.count) {
        free_bytes(name.data, name.len);
    }
    drop(free_array(array.kinds, array.count));
}
