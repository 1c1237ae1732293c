//! Unit tests for the feature-flag registry

use core_types::flags::{self, FlagKind};

#[test]
fn test_registry_has_builtin_flags() {
    let registry = flags::registry();
    assert!(!registry.is_empty());
    assert!(registry
        .get_bool(flags::FLAG_COMPILE_FOLD_CONSTANTS)
        .is_some());
    assert!(registry.get_int(flags::FLAG_PARSE_ERROR_LIMIT).is_some());
}

#[test]
fn test_set_then_get_int() {
    let registry = flags::registry();
    let original = registry.get_int(flags::FLAG_PARSE_ERROR_LIMIT).unwrap();
    assert!(registry.set_int(flags::FLAG_PARSE_ERROR_LIMIT, original));
    assert_eq!(
        registry.get_int(flags::FLAG_PARSE_ERROR_LIMIT),
        Some(original)
    );
}

#[test]
fn test_enumeration_matches_registry_size() {
    let registry = flags::registry();
    let entries = registry.list();
    assert_eq!(entries.len(), registry.len());
}

#[test]
fn test_kind_tags_are_stable() {
    assert_eq!(FlagKind::Bool as i32, 0);
    assert_eq!(FlagKind::Int as i32, 1);
}
