//! Contract compliance tests for bytecode_system
//!
//! Verifies the shapes the compiler and C boundary rely on.

use bytecode_system::{Chunk, Constant, Instruction, Module, Opcode};

/// Verify all opcode variants exist as specified in the instruction set
#[test]
fn test_contract_opcode_variants() {
    // Literals
    let _ = Opcode::LoadConstant(0);
    let _ = Opcode::LoadNil;
    let _ = Opcode::LoadTrue;
    let _ = Opcode::LoadFalse;

    // Variables
    let _ = Opcode::LoadLocal(0);
    let _ = Opcode::StoreLocal(0);
    let _ = Opcode::LoadGlobal(0);
    let _ = Opcode::StoreGlobal(0);

    // Stack
    let _ = Opcode::Dup;
    let _ = Opcode::Pop(1);

    // Arithmetic
    let _ = Opcode::Add;
    let _ = Opcode::Sub;
    let _ = Opcode::Mul;
    let _ = Opcode::Div;
    let _ = Opcode::Mod;
    let _ = Opcode::Pow;
    let _ = Opcode::Concat;
    let _ = Opcode::Neg;
    let _ = Opcode::Not;
    let _ = Opcode::Len;

    // Comparison
    let _ = Opcode::Eq;
    let _ = Opcode::NotEq;
    let _ = Opcode::Lt;
    let _ = Opcode::LtEq;
    let _ = Opcode::Gt;
    let _ = Opcode::GtEq;

    // Tables
    let _ = Opcode::NewTable(0);
    let _ = Opcode::Index;
    let _ = Opcode::StoreIndex;

    // Control flow
    let _ = Opcode::Jump(0);
    let _ = Opcode::JumpIfFalse(0);
    let _ = Opcode::JumpIfTrue(0);

    // Functions
    let _ = Opcode::NewClosure(0);
    let _ = Opcode::Call { args: 0, results: 0 };
    let _ = Opcode::Vararg(0);
    let _ = Opcode::Return(0);
}

/// Verify Instruction struct has required fields
#[test]
fn test_contract_instruction_structure() {
    let inst = Instruction::new(Opcode::Add);
    let _opcode: &Opcode = &inst.opcode;
    let _pos: &Option<core_types::Position> = &inst.position;
}

/// Verify Chunk struct has required fields
#[test]
fn test_contract_chunk_fields() {
    let chunk = Chunk::new();
    let _instructions: &Vec<Instruction> = &chunk.instructions;
    let _constants: &Vec<Constant> = &chunk.constants;
    let _params: u8 = chunk.num_params;
    let _vararg: bool = chunk.is_vararg;
    let _registers: u8 = chunk.register_count;
}

/// Verify Module struct has required fields
#[test]
fn test_contract_module_fields() {
    let module = Module::new();
    let _strings: &Vec<String> = &module.strings;
    let _chunks: &Vec<Chunk> = &module.chunks;
    let _main: u32 = module.main;
}
