//! Bytecode chunk and module containers
//!
//! A [`Chunk`] holds the code for one compiled function. A [`Module`] holds
//! every chunk of a compilation unit plus the shared string table; chunks for
//! nested functions appear before the chunks that reference them.

use crate::opcode::Opcode;
use core_types::Position;

/// A constant-pool entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constant {
    /// The nil value
    Nil,
    /// A boolean literal
    Bool(bool),
    /// A number literal
    Number(f64),
    /// A string literal, as an index into the module string table
    Str(u32),
}

/// A single bytecode instruction with optional source mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instruction {
    /// The opcode for this instruction
    pub opcode: Opcode,
    /// Optional source position for error reporting
    pub position: Option<Position>,
}

impl Instruction {
    /// Create a new instruction without source position
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            position: None,
        }
    }

    /// Create a new instruction with source position
    pub fn with_position(opcode: Opcode, position: Position) -> Self {
        Self {
            opcode,
            position: Some(position),
        }
    }
}

/// One compiled function: instructions, constants, and metadata
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chunk {
    /// Sequence of bytecode instructions
    pub instructions: Vec<Instruction>,
    /// Constant pool for literal values
    pub constants: Vec<Constant>,
    /// Number of declared parameters
    pub num_params: u8,
    /// True when the function accepts `...`
    pub is_vararg: bool,
    /// Number of local slots needed for execution
    pub register_count: u8,
    /// Function name as a module string index, when known
    pub name: Option<u32>,
    /// Line on which the function was defined (0-based)
    pub line_defined: u32,
    /// True when the function carried the `@native` attribute
    pub native: bool,
}

impl Chunk {
    /// Create a new empty chunk
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit an instruction without source position, returning its index
    pub fn emit(&mut self, opcode: Opcode) -> usize {
        let idx = self.instructions.len();
        self.instructions.push(Instruction::new(opcode));
        idx
    }

    /// Emit an instruction with source position, returning its index
    pub fn emit_with_position(&mut self, opcode: Opcode, position: Position) -> usize {
        let idx = self.instructions.len();
        self.instructions
            .push(Instruction::with_position(opcode, position));
        idx
    }

    /// Add a constant to the pool and return its index, reusing an existing
    /// entry when one compares equal
    pub fn add_constant(&mut self, value: Constant) -> u32 {
        if let Some(idx) = self.constants.iter().position(|c| *c == value) {
            return idx as u32;
        }
        let idx = self.constants.len() as u32;
        self.constants.push(value);
        idx
    }

    /// Rewrite the jump target of the instruction at `at` to `target`
    ///
    /// Panics if the instruction at `at` is not a jump.
    pub fn patch_jump(&mut self, at: usize, target: u32) {
        let inst = &mut self.instructions[at];
        inst.opcode = match inst.opcode {
            Opcode::Jump(_) => Opcode::Jump(target),
            Opcode::JumpIfFalse(_) => Opcode::JumpIfFalse(target),
            Opcode::JumpIfTrue(_) => Opcode::JumpIfTrue(target),
            other => panic!("patch_jump on non-jump opcode {:?}", other),
        };
    }

    /// Get the number of instructions
    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }
}

/// A complete compilation unit
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    /// Deduplicated string table shared by every chunk
    pub strings: Vec<String>,
    /// Every chunk in the module, nested functions before their parents
    pub chunks: Vec<Chunk>,
    /// Index of the main chunk within `chunks`
    pub main: u32,
}

impl Module {
    /// Create a new empty module
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string into the module table and return its index
    pub fn add_string(&mut self, value: &str) -> u32 {
        if let Some(idx) = self.strings.iter().position(|s| s == value) {
            return idx as u32;
        }
        let idx = self.strings.len() as u32;
        self.strings.push(value.to_string());
        idx
    }

    /// Add a chunk and return its index
    pub fn add_chunk(&mut self, chunk: Chunk) -> u32 {
        let idx = self.chunks.len() as u32;
        self.chunks.push(chunk);
        idx
    }
}
