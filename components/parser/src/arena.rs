//! Index-pool arena for AST nodes and interned names.
//!
//! Every node produced by parsing lives in one [`Arena`], referenced by
//! [`NodeRef`] indices rather than pointers. Dropping the arena releases the
//! whole tree at once; anything still holding a `NodeRef` into it is invalid
//! from that moment on. Each arena carries a process-unique generation number
//! that derived structures record, so cross-arena misuse trips an assertion
//! instead of silently reading the wrong pool.

use crate::ast::AstNode;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_GENERATION: AtomicU32 = AtomicU32::new(1);

/// Reference to an AST node inside an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(pub(crate) u32);

/// Reference to an interned name inside an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NameId(pub(crate) u32);

/// An append-only allocation pool owning AST nodes and name strings.
pub struct Arena {
    generation: u32,
    nodes: Vec<AstNode>,
    names: Vec<Box<str>>,
}

impl Arena {
    /// Create a fresh arena with a process-unique generation number.
    pub fn new() -> Self {
        Self {
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::new(),
            names: Vec::new(),
        }
    }

    /// The generation number identifying this arena.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Allocate a node, returning its reference.
    pub fn alloc(&mut self, node: AstNode) -> NodeRef {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        NodeRef(index)
    }

    /// Look up a node by reference.
    pub fn get(&self, node: NodeRef) -> &AstNode {
        &self.nodes[node.0 as usize]
    }

    /// Number of allocated nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Store a name string, returning its id. Deduplication is the
    /// interner's job; the arena only owns the bytes.
    pub(crate) fn alloc_name(&mut self, text: &str) -> NameId {
        let index = self.names.len() as u32;
        self.names.push(text.into());
        NameId(index)
    }

    /// Look up an interned name's text.
    pub fn name(&self, id: NameId) -> &str {
        &self.names[id.0 as usize]
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}
