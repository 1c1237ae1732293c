//! Binary serialization of compiled modules
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! [version: u8]
//! [string count: u32] ([len: u32][bytes])*
//! [chunk count: u32]  (chunk)*
//! [main chunk index: u32]
//! ```
//!
//! Each chunk is `[num_params: u8][is_vararg: u8][register_count: u8]
//! [native: u8][line_defined: u32][name flag: u8 (+ index: u32)]
//! [constant count: u32] (constant)* [instruction count: u32]
//! (instruction)*`.
//!
//! The first byte doubles as a success/error discriminant: `0` never begins a
//! versioned module and instead marks an error payload whose remaining bytes
//! are the raw message.

use crate::chunk::{Chunk, Constant, Instruction, Module};
use crate::opcode::Opcode;

/// Current serialized format version. Must stay >= 1; 0 is the error marker.
pub const FORMAT_VERSION: u8 = 1;

/// Leading byte of an error payload.
pub const ERROR_MARKER: u8 = 0;

/// True when `bytes` is an error payload rather than a versioned module.
pub fn is_error_payload(bytes: &[u8]) -> bool {
    bytes.first() == Some(&ERROR_MARKER)
}

/// Encode an error message as a self-describing payload: a `0` marker byte
/// followed by the raw message bytes.
pub fn encode_error(message: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(1 + message.len());
    bytes.push(ERROR_MARKER);
    bytes.extend_from_slice(message.as_bytes());
    bytes
}

/// Serialize a module to the versioned binary format.
pub fn encode_module(module: &Module) -> Vec<u8> {
    let mut bytes = Vec::new();

    bytes.push(FORMAT_VERSION);

    bytes.extend_from_slice(&(module.strings.len() as u32).to_le_bytes());
    for string in &module.strings {
        bytes.extend_from_slice(&(string.len() as u32).to_le_bytes());
        bytes.extend_from_slice(string.as_bytes());
    }

    bytes.extend_from_slice(&(module.chunks.len() as u32).to_le_bytes());
    for chunk in &module.chunks {
        encode_chunk(chunk, &mut bytes);
    }

    bytes.extend_from_slice(&module.main.to_le_bytes());

    log::trace!(
        "encoded module: {} strings, {} chunks, {} bytes",
        module.strings.len(),
        module.chunks.len(),
        bytes.len()
    );

    bytes
}

fn encode_chunk(chunk: &Chunk, bytes: &mut Vec<u8>) {
    bytes.push(chunk.num_params);
    bytes.push(chunk.is_vararg as u8);
    bytes.push(chunk.register_count);
    bytes.push(chunk.native as u8);
    bytes.extend_from_slice(&chunk.line_defined.to_le_bytes());

    match chunk.name {
        Some(index) => {
            bytes.push(1);
            bytes.extend_from_slice(&index.to_le_bytes());
        }
        None => bytes.push(0),
    }

    bytes.extend_from_slice(&(chunk.constants.len() as u32).to_le_bytes());
    for constant in &chunk.constants {
        encode_constant(constant, bytes);
    }

    bytes.extend_from_slice(&(chunk.instructions.len() as u32).to_le_bytes());
    for inst in &chunk.instructions {
        encode_instruction(inst, bytes);
    }
}

fn encode_constant(constant: &Constant, bytes: &mut Vec<u8>) {
    match constant {
        Constant::Nil => bytes.push(0),
        Constant::Bool(value) => {
            bytes.push(1);
            bytes.push(*value as u8);
        }
        Constant::Number(value) => {
            bytes.push(2);
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        Constant::Str(index) => {
            bytes.push(3);
            bytes.extend_from_slice(&index.to_le_bytes());
        }
    }
}

fn encode_instruction(inst: &Instruction, bytes: &mut Vec<u8>) {
    encode_opcode(&inst.opcode, bytes);

    match &inst.position {
        Some(pos) => {
            bytes.push(1);
            bytes.extend_from_slice(&pos.line.to_le_bytes());
            bytes.extend_from_slice(&pos.column.to_le_bytes());
        }
        None => bytes.push(0),
    }
}

fn encode_opcode(opcode: &Opcode, bytes: &mut Vec<u8>) {
    match *opcode {
        Opcode::LoadConstant(idx) => {
            bytes.push(1);
            bytes.extend_from_slice(&idx.to_le_bytes());
        }
        Opcode::LoadNil => bytes.push(2),
        Opcode::LoadTrue => bytes.push(3),
        Opcode::LoadFalse => bytes.push(4),
        Opcode::LoadLocal(slot) => {
            bytes.push(5);
            bytes.push(slot);
        }
        Opcode::StoreLocal(slot) => {
            bytes.push(6);
            bytes.push(slot);
        }
        Opcode::LoadGlobal(idx) => {
            bytes.push(7);
            bytes.extend_from_slice(&idx.to_le_bytes());
        }
        Opcode::StoreGlobal(idx) => {
            bytes.push(8);
            bytes.extend_from_slice(&idx.to_le_bytes());
        }
        Opcode::Dup => bytes.push(9),
        Opcode::Pop(count) => {
            bytes.push(10);
            bytes.push(count);
        }
        Opcode::Add => bytes.push(11),
        Opcode::Sub => bytes.push(12),
        Opcode::Mul => bytes.push(13),
        Opcode::Div => bytes.push(14),
        Opcode::Mod => bytes.push(15),
        Opcode::Pow => bytes.push(16),
        Opcode::Concat => bytes.push(17),
        Opcode::Neg => bytes.push(18),
        Opcode::Not => bytes.push(19),
        Opcode::Len => bytes.push(20),
        Opcode::Eq => bytes.push(21),
        Opcode::NotEq => bytes.push(22),
        Opcode::Lt => bytes.push(23),
        Opcode::LtEq => bytes.push(24),
        Opcode::Gt => bytes.push(25),
        Opcode::GtEq => bytes.push(26),
        Opcode::NewTable(count) => {
            bytes.push(27);
            bytes.extend_from_slice(&count.to_le_bytes());
        }
        Opcode::Index => bytes.push(28),
        Opcode::StoreIndex => bytes.push(29),
        Opcode::Jump(target) => {
            bytes.push(30);
            bytes.extend_from_slice(&target.to_le_bytes());
        }
        Opcode::JumpIfFalse(target) => {
            bytes.push(31);
            bytes.extend_from_slice(&target.to_le_bytes());
        }
        Opcode::JumpIfTrue(target) => {
            bytes.push(32);
            bytes.extend_from_slice(&target.to_le_bytes());
        }
        Opcode::NewClosure(idx) => {
            bytes.push(33);
            bytes.extend_from_slice(&idx.to_le_bytes());
        }
        Opcode::Call { args, results } => {
            bytes.push(34);
            bytes.push(args);
            bytes.push(results);
        }
        Opcode::Vararg(count) => {
            bytes.push(35);
            bytes.push(count);
        }
        Opcode::Return(count) => {
            bytes.push(36);
            bytes.push(count);
        }
    }
}
