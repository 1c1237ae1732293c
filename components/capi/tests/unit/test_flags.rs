//! Unit tests for the flag registry bridge

use core_types::flags;
use lumen_capi::{
    lumen_flag_get_bool, lumen_flag_get_int, lumen_flag_set_bool, lumen_flag_set_int,
    lumen_flags_free, lumen_flags_list,
};

unsafe fn get_bool(name: &str, out: &mut bool) -> bool {
    lumen_flag_get_bool(name.as_ptr(), name.len(), out)
}

unsafe fn get_int(name: &str, out: &mut i32) -> bool {
    lumen_flag_get_int(name.as_ptr(), name.len(), out)
}

#[test]
fn test_bool_flag_round_trip() {
    let name = flags::FLAG_PARSE_ALLOW_ATTRIBUTES;
    unsafe {
        assert!(lumen_flag_set_bool(name.as_ptr(), name.len(), true));
        let mut out = false;
        assert!(get_bool(name, &mut out));
        assert!(out);
    }
}

#[test]
fn test_int_flag_round_trip() {
    let name = flags::FLAG_PARSE_RECURSION_LIMIT;
    unsafe {
        let mut original = 0;
        assert!(get_int(name, &mut original));
        assert!(lumen_flag_set_int(name.as_ptr(), name.len(), original));
        let mut out = 0;
        assert!(get_int(name, &mut out));
        assert_eq!(out, original);
    }
}

#[test]
fn test_unknown_name_leaves_out_param_untouched() {
    unsafe {
        let mut out_bool = true;
        assert!(!get_bool("LumenNoSuchFlag", &mut out_bool));
        assert!(out_bool);

        let mut out_int = 41;
        assert!(!get_int("LumenNoSuchFlag", &mut out_int));
        assert_eq!(out_int, 41);

        let name = "LumenNoSuchFlag";
        assert!(!lumen_flag_set_bool(name.as_ptr(), name.len(), true));
        assert!(!lumen_flag_set_int(name.as_ptr(), name.len(), 7));
    }
}

#[test]
fn test_typed_lookup_does_not_cross() {
    unsafe {
        let mut out_bool = false;
        assert!(!get_bool(flags::FLAG_PARSE_ERROR_LIMIT, &mut out_bool));
        let mut out_int = 0;
        assert!(!get_int(flags::FLAG_COMPILE_FOLD_CONSTANTS, &mut out_int));
    }
}

#[test]
fn test_enumeration_is_complete_and_ordered() {
    let array = lumen_flags_list();
    assert_eq!(array.count, flags::registry().len());
    assert!(!array.names.is_null());
    assert!(!array.kinds.is_null());

    unsafe {
        let names = std::slice::from_raw_parts(array.names, array.count);
        let kinds = std::slice::from_raw_parts(array.kinds, array.count);

        // All booleans precede all integers.
        let first_int = kinds.iter().position(|&k| k == 1).unwrap_or(array.count);
        assert!(kinds[..first_int].iter().all(|&k| k == 0));
        assert!(kinds[first_int..].iter().all(|&k| k == 1));

        let listed: Vec<String> = names
            .iter()
            .map(|buffer| {
                String::from_utf8_lossy(std::slice::from_raw_parts(buffer.data, buffer.len))
                    .into_owned()
            })
            .collect();
        assert!(listed.iter().any(|n| n == flags::FLAG_COMPILE_FOLD_CONSTANTS));
        assert!(listed.iter().any(|n| n == flags::FLAG_PARSE_ERROR_LIMIT));

        lumen_flags_free(array);
    }
}
