//! Unit tests for chunk and module containers

use bytecode_system::{Chunk, Constant, Module, Opcode};
use core_types::Position;

#[test]
fn test_instruction_position_round_trip() {
    let mut chunk = Chunk::new();
    chunk.emit_with_position(Opcode::Add, Position::new(3, 7));
    let inst = &chunk.instructions[0];
    assert_eq!(inst.position, Some(Position::new(3, 7)));
}

#[test]
fn test_constant_pool_reuse_across_kinds() {
    let mut chunk = Chunk::new();
    let n = chunk.add_constant(Constant::Number(1.0));
    let b = chunk.add_constant(Constant::Bool(true));
    let s = chunk.add_constant(Constant::Str(0));
    assert_eq!(chunk.constants.len(), 3);
    assert!(n != b && b != s);
}

#[test]
fn test_module_chunk_order_is_insertion_order() {
    let mut module = Module::new();
    let mut inner = Chunk::new();
    inner.line_defined = 2;
    let mut outer = Chunk::new();
    outer.line_defined = 1;

    let inner_idx = module.add_chunk(inner);
    let outer_idx = module.add_chunk(outer);
    module.main = outer_idx;

    assert!(inner_idx < outer_idx);
    assert_eq!(module.chunks[inner_idx as usize].line_defined, 2);
}
