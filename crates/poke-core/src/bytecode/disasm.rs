//! Minimal textual disassembly helpers used by the CLI tooling.

use core::fmt::Write;

use crate::bytecode::chunk::Chunk;
use crate::bytecode::opcode::OpCode;

/// Render the instruction at `offset`; returns the text and the offset of
/// the next instruction.
///
/// Unknown bytes render as `unknown opcode 0xNN` and advance by one.
pub fn disassemble_instruction(chunk: &Chunk, offset: usize) -> (String, usize) {
    let Some(byte) = chunk.get(offset) else {
        return (String::from("<end of chunk>"), offset);
    };
    match OpCode::from_byte(byte) {
        Some(op) => simple_instruction(op, offset),
        None => (format!("unknown opcode 0x{byte:02X}"), offset + 1),
    }
}

fn simple_instruction(op: OpCode, offset: usize) -> (String, usize) {
    (op.mnemonic().to_string(), offset + op.size())
}

/// Produce a multi-line, human readable disassembly of `chunk`.
///
/// ```text
/// == demo == (count=1, capacity=8)
/// 0000 OP_RETURN
/// ```
pub fn disassemble_chunk(chunk: &Chunk, name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "== {name} == (count={}, capacity={})",
        chunk.count(),
        chunk.capacity()
    );

    let mut offset = 0;
    while offset < chunk.count() {
        let (text, next) = disassemble_instruction(chunk, offset);
        let _ = writeln!(out, "{offset:04} {text}");
        offset = next;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_chunk_has_only_header() {
        let chunk = Chunk::new();
        assert_eq!(
            disassemble_chunk(&chunk, "empty"),
            "== empty == (count=0, capacity=0)\n"
        );
    }

    #[test]
    fn return_and_unknown() {
        let mut chunk = Chunk::new();
        chunk.write_op(OpCode::Return).unwrap();
        chunk.write(0x7F).unwrap();
        chunk.write_op(OpCode::Return).unwrap();
        assert_eq!(
            disassemble_chunk(&chunk, "test chunk"),
            "== test chunk == (count=3, capacity=8)\n\
             0000 OP_RETURN\n\
             0001 unknown opcode 0x7F\n\
             0002 OP_RETURN\n"
        );
    }

    #[test]
    fn instruction_past_end() {
        let chunk = Chunk::new();
        assert_eq!(
            disassemble_instruction(&chunk, 0),
            (String::from("<end of chunk>"), 0)
        );
    }
}
