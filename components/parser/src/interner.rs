//! Deduplicating name table bound to one arena.

use crate::arena::{Arena, NameId};
use std::collections::HashMap;

/// Maps name text to a canonical [`NameId`] whose bytes live in the bound
/// arena. The arena must outlive the interner; interning against a different
/// arena than the one the interner was created for is a contract violation
/// caught by an internal assertion.
pub struct NameInterner {
    arena_generation: u32,
    map: HashMap<Box<str>, NameId>,
}

impl NameInterner {
    /// Create an interner bound to `arena`.
    pub fn new(arena: &Arena) -> Self {
        Self {
            arena_generation: arena.generation(),
            map: HashMap::new(),
        }
    }

    /// The generation of the arena this interner is bound to.
    pub fn arena_generation(&self) -> u32 {
        self.arena_generation
    }

    /// Intern `text`, returning the canonical id for it.
    pub fn intern(&mut self, arena: &mut Arena, text: &str) -> NameId {
        core_types::runtime_assert!(arena.generation() == self.arena_generation);
        if let Some(&id) = self.map.get(text) {
            return id;
        }
        let id = arena.alloc_name(text);
        self.map.insert(text.into(), id);
        id
    }

    /// Look up a previously interned name without inserting.
    pub fn lookup(&self, text: &str) -> Option<NameId> {
        self.map.get(text).copied()
    }

    /// Number of distinct interned names.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True when nothing has been interned.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
