//! Helper validations reused by tooling.

use crate::bytecode::chunk::Chunk;
use crate::bytecode::opcode::OpCode;
use crate::{CoreError, CoreResult};

/// Basic structural validation of a chunk.
///
/// Walks the chunk instruction by instruction and fails on the first byte
/// that names no opcode, or on an instruction running past `count`.
pub fn validate_chunk(chunk: &Chunk) -> CoreResult<()> {
    debug_assert!(chunk.count() <= chunk.capacity());

    let mut offset = 0;
    while offset < chunk.count() {
        let op = chunk.read_op(offset)?;
        let next = offset + op.size();
        if next > chunk.count() {
            return Err(CoreError::OutOfBounds { offset: next - 1, count: chunk.count() });
        }
        offset = next;
    }
    Ok(())
}

/// Instructions of a chunk, decoded in order, stopping at the first error.
pub fn decode_all(chunk: &Chunk) -> CoreResult<Vec<(usize, OpCode)>> {
    let mut ops = Vec::new();
    let mut offset = 0;
    while offset < chunk.count() {
        let op = chunk.read_op(offset)?;
        ops.push((offset, op));
        offset += op.size();
    }
    Ok(ops)
}
