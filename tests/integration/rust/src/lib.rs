//! Integration test suite for the Lumen compiler boundary
//!
//! Verifies that the parsing, bytecode, and C boundary components work
//! together correctly across component boundaries.

/// Re-export components for test convenience
pub mod components {
    pub use bytecode_system;
    pub use core_types;
    pub use lumen_capi;
    pub use parser;
}
