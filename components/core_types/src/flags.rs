//! Process-wide typed feature-flag registry.
//!
//! Flags gate compiler behavior without recompiling embedders. The registry is
//! an explicit singleton built from a declarative table at first use; its
//! *structure* (which flags exist, of which type) is frozen after
//! initialization, while values are atomics that may be read and written from
//! any thread. Lookup is exact-name match over each typed list; enumeration
//! yields all boolean flags first, then all integer flags, each in
//! registration order.
//!
//! # Examples
//!
//! ```
//! use core_types::flags;
//!
//! let registry = flags::registry();
//! assert!(registry.set_bool("LumenCompileFoldConstants", true));
//! assert_eq!(registry.get_bool("LumenCompileFoldConstants"), Some(true));
//! assert_eq!(registry.get_bool("no-such-flag"), None);
//! ```

use lazy_static::lazy_static;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

/// Enables constant folding of arithmetic on literal operands during
/// bytecode generation.
pub const FLAG_COMPILE_FOLD_CONSTANTS: &str = "LumenCompileFoldConstants";

/// Enables parsing of `@attribute` markers before function definitions.
pub const FLAG_PARSE_ALLOW_ATTRIBUTES: &str = "LumenParseAllowAttributes";

/// Maximum number of diagnostics collected before parsing gives up.
pub const FLAG_PARSE_ERROR_LIMIT: &str = "LumenParseErrorLimit";

/// Maximum nesting depth accepted by the recursive descent parser.
pub const FLAG_PARSE_RECURSION_LIMIT: &str = "LumenParseRecursionLimit";

/// Declarative table of boolean flags: (name, default).
const BOOL_FLAGS: &[(&str, bool)] = &[
    (FLAG_COMPILE_FOLD_CONSTANTS, true),
    (FLAG_PARSE_ALLOW_ATTRIBUTES, true),
];

/// Declarative table of integer flags: (name, default).
const INT_FLAGS: &[(&str, i32)] = &[
    (FLAG_PARSE_ERROR_LIMIT, 100),
    (FLAG_PARSE_RECURSION_LIMIT, 256),
];

/// The type of a registered flag.
///
/// The numeric values are part of the boundary contract: 0 = boolean,
/// 1 = integer. No other values are defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum FlagKind {
    /// Boolean-valued flag
    Bool = 0,
    /// Integer-valued flag
    Int = 1,
}

struct BoolFlag {
    name: &'static str,
    value: AtomicBool,
}

struct IntFlag {
    name: &'static str,
    value: AtomicI32,
}

/// The process-wide flag registry.
///
/// Obtain the singleton via [`registry`]. All accessors take `&self`; value
/// mutation goes through atomics, so no external locking is required for
/// memory safety. Writer ordering across threads remains the caller's
/// convention, as with any shared knob.
pub struct FlagRegistry {
    bools: Vec<BoolFlag>,
    ints: Vec<IntFlag>,
}

impl FlagRegistry {
    fn from_tables(bools: &[(&'static str, bool)], ints: &[(&'static str, i32)]) -> Self {
        Self {
            bools: bools
                .iter()
                .map(|&(name, default)| BoolFlag {
                    name,
                    value: AtomicBool::new(default),
                })
                .collect(),
            ints: ints
                .iter()
                .map(|&(name, default)| IntFlag {
                    name,
                    value: AtomicI32::new(default),
                })
                .collect(),
        }
    }

    /// Read a boolean flag by exact name. Returns `None` when no boolean
    /// flag has that name.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.bools
            .iter()
            .find(|flag| flag.name == name)
            .map(|flag| flag.value.load(Ordering::Relaxed))
    }

    /// Write a boolean flag by exact name. Returns false when no boolean
    /// flag has that name.
    pub fn set_bool(&self, name: &str, value: bool) -> bool {
        match self.bools.iter().find(|flag| flag.name == name) {
            Some(flag) => {
                log::debug!("flag {} <- {}", name, value);
                flag.value.store(value, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    /// Read an integer flag by exact name. Returns `None` when no integer
    /// flag has that name.
    pub fn get_int(&self, name: &str) -> Option<i32> {
        self.ints
            .iter()
            .find(|flag| flag.name == name)
            .map(|flag| flag.value.load(Ordering::Relaxed))
    }

    /// Write an integer flag by exact name. Returns false when no integer
    /// flag has that name.
    pub fn set_int(&self, name: &str, value: i32) -> bool {
        match self.ints.iter().find(|flag| flag.name == name) {
            Some(flag) => {
                log::debug!("flag {} <- {}", name, value);
                flag.value.store(value, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    /// Total number of registered flags of both types.
    pub fn len(&self) -> usize {
        self.bools.len() + self.ints.len()
    }

    /// True when no flags are registered.
    pub fn is_empty(&self) -> bool {
        self.bools.is_empty() && self.ints.is_empty()
    }

    /// Enumerate every flag as `(name, kind)`, all booleans first, then all
    /// integers, each group in registration order.
    pub fn list(&self) -> Vec<(&'static str, FlagKind)> {
        let mut entries = Vec::with_capacity(self.len());
        for flag in &self.bools {
            entries.push((flag.name, FlagKind::Bool));
        }
        for flag in &self.ints {
            entries.push((flag.name, FlagKind::Int));
        }
        entries
    }
}

lazy_static! {
    static ref REGISTRY: FlagRegistry = FlagRegistry::from_tables(BOOL_FLAGS, INT_FLAGS);
}

/// The process-wide registry singleton.
pub fn registry() -> &'static FlagRegistry {
    &REGISTRY
}
