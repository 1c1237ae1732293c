//! Bytecode opcodes for the Lumen VM
//!
//! The machine is stack-based with numbered local slots. Operands that name
//! constants or strings are indices into the owning chunk's constant pool or
//! the module string table.

/// Bytecode opcodes for Lumen execution
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Opcode {
    // Literals
    /// Push constant from the constant pool at the given index
    LoadConstant(u32),
    /// Push nil
    LoadNil,
    /// Push boolean true
    LoadTrue,
    /// Push boolean false
    LoadFalse,

    // Variables
    /// Push the value of local slot
    LoadLocal(u8),
    /// Pop into local slot
    StoreLocal(u8),
    /// Push a global by name (module string index)
    LoadGlobal(u32),
    /// Pop into a global by name (module string index)
    StoreGlobal(u32),

    // Stack shuffling
    /// Duplicate the top of stack
    Dup,
    /// Pop N values
    Pop(u8),

    // Arithmetic and logic
    /// Add top two values
    Add,
    /// Subtract top from second-top
    Sub,
    /// Multiply top two values
    Mul,
    /// Divide second-top by top
    Div,
    /// Modulo second-top by top
    Mod,
    /// Raise second-top to top
    Pow,
    /// Concatenate second-top with top
    Concat,
    /// Negate top value
    Neg,
    /// Logical not of top value
    Not,
    /// Length of top value
    Len,

    // Comparison
    /// Equality
    Eq,
    /// Inequality
    NotEq,
    /// Less than
    Lt,
    /// Less than or equal
    LtEq,
    /// Greater than
    Gt,
    /// Greater than or equal
    GtEq,

    // Tables
    /// Create a table, popping N array-part values
    NewTable(u16),
    /// Pop key then table, push table[key]
    Index,
    /// Pop value, key, table; perform table[key] = value
    StoreIndex,

    // Control flow
    /// Unconditional jump to instruction index
    Jump(u32),
    /// Pop condition, jump to instruction index when falsy
    JumpIfFalse(u32),
    /// Pop condition, jump to instruction index when truthy
    JumpIfTrue(u32),

    // Functions
    /// Push a closure over the module chunk at the given index
    NewClosure(u32),
    /// Call with N arguments, keeping M results
    Call {
        /// Argument count
        args: u8,
        /// Result count to keep
        results: u8,
    },
    /// Push N values from the caller's extra arguments
    Vararg(u8),
    /// Return the top N values
    Return(u8),
}
