//! Bytecode primitives: opcodes, the chunk they are written to, and the
//! read-side helpers (disassembly, validation).

/// Instruction opcodes and their byte decoding.
pub mod opcode;
/// Growable chunk of instruction bytes.
pub mod chunk;
pub mod helpers;
pub mod disasm;

pub use chunk::Chunk;
pub use opcode::{OpCode, OpCodeError};
