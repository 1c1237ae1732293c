//! Bytecode containers and binary serialization for the Lumen compiler.
//!
//! # Overview
//!
//! - [`Opcode`] - Instruction set for the stack/register VM
//! - [`Instruction`] - Opcode plus optional source position
//! - [`Chunk`] - One compiled function: instructions, constants, metadata
//! - [`Module`] - String table, function chunks, and the main chunk index
//! - [`serialize`] - The version-prefixed binary format and error payloads
//!
//! The serialized format is self-describing in its first byte: any value
//! `>= 1` is a format version, while `0` marks an error payload whose
//! remaining bytes are a human-readable message. Version byte 0 is reserved
//! as the error marker forever.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod chunk;
mod opcode;
pub mod serialize;

pub use chunk::{Chunk, Constant, Instruction, Module};
pub use opcode::Opcode;
