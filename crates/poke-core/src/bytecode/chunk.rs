//! Bytecode chunk: the growable sequence of instruction bytes.
//!
//! A compiler appends opcode and operand bytes with [`Chunk::write`]; a
//! disassembler or interpreter later reads `count` bytes back in order.
//! Storage is a [`GrowableArray`] of bytes, so the chunk inherits its
//! invariant (`count <= capacity`) and its growth rule (floor 8, doubling).

use crate::buffer::GrowableArray;
use crate::bytecode::opcode::OpCode;
use crate::memory::Doubling;
use crate::{CoreError, CoreResult};

/// Instruction bytes emitted for one unit of code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk {
    code: GrowableArray<u8>,
}

impl Chunk {
    /// Empty chunk: `count == 0`, `capacity == 0`, no storage.
    #[must_use]
    pub const fn new() -> Self {
        Self { code: GrowableArray::new() }
    }

    /// Same as [`Chunk::new`].
    #[must_use]
    pub const fn init() -> Self {
        Self::new()
    }

    /// Empty chunk growing by `policy` instead of the default rule.
    #[must_use]
    pub const fn with_policy(policy: Doubling) -> Self {
        Self { code: GrowableArray::with_policy(policy) }
    }

    /// Bytes written so far.
    pub fn count(&self) -> usize {
        self.code.count()
    }

    /// Bytes reserved by the last growth step.
    pub const fn capacity(&self) -> usize {
        self.code.capacity()
    }

    /// True when no byte has been written.
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Growth configuration of this chunk.
    pub const fn policy(&self) -> &Doubling {
        self.code.policy()
    }

    /// Written bytes, in order.
    pub fn code(&self) -> &[u8] {
        self.code.as_slice()
    }

    /// Byte at `offset`, if written.
    pub fn get(&self, offset: usize) -> Option<u8> {
        self.code.get(offset).copied()
    }

    /// Append one byte.
    ///
    /// Grows the storage first when it is full. Growth replaces the storage,
    /// which the borrow checker already forbids while a slice from
    /// [`code`](Self::code) is alive.
    ///
    /// # Errors
    /// [`CoreError::AllocationFailed`] or [`CoreError::CapacityOverflow`];
    /// the chunk is left exactly as it was.
    pub fn write(&mut self, byte: u8) -> CoreResult<()> {
        self.code.push(byte)
    }

    /// Append an opcode.
    ///
    /// # Errors
    /// Same as [`write`](Self::write).
    pub fn write_op(&mut self, op: OpCode) -> CoreResult<()> {
        self.write(op.as_byte())
    }

    /// Append several bytes with at most one growth step.
    ///
    /// # Errors
    /// Same as [`write`](Self::write); nothing is appended on error.
    pub fn write_all(&mut self, bytes: &[u8]) -> CoreResult<()> {
        self.code.extend_from_slice(bytes)
    }

    /// Decode the opcode stored at `offset`.
    ///
    /// # Errors
    /// [`CoreError::OutOfBounds`] past `count`, [`CoreError::InvalidOpcode`]
    /// when the byte names no opcode.
    pub fn read_op(&self, offset: usize) -> CoreResult<OpCode> {
        let byte = self.get(offset).ok_or(CoreError::OutOfBounds {
            offset,
            count: self.count(),
        })?;
        OpCode::try_from(byte).map_err(|e| CoreError::invalid_opcode(offset, e))
    }

    /// Release the storage; the chunk is then identical to [`Chunk::new`]
    /// with its policy kept.
    pub fn free(&mut self) {
        self.code.free();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_chunks_are_identical() {
        let a = Chunk::init();
        let b = Chunk::new();
        assert_eq!(a, b);
        assert_eq!(a.count(), 0);
        assert_eq!(a.capacity(), 0);
        assert!(a.code().is_empty());
    }

    #[test]
    fn first_write_allocates_eight() {
        let mut c = Chunk::new();
        c.write(1).unwrap();
        assert_eq!(c.count(), 1);
        assert_eq!(c.capacity(), 8);
    }

    #[test]
    fn ninth_byte_doubles_and_preserves() {
        let mut c = Chunk::new();
        for b in 1..=8u8 {
            c.write(b).unwrap();
            assert_eq!(c.count(), usize::from(b));
            assert_eq!(c.capacity(), 8);
        }
        c.write(9).unwrap();
        assert_eq!(c.capacity(), 16);
        assert_eq!(c.count(), 9);
        assert_eq!(c.code(), &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn write_op_and_read_back() {
        let mut c = Chunk::new();
        c.write_op(OpCode::Return).unwrap();
        assert_eq!(c.get(0), Some(0));
        assert_eq!(c.read_op(0), Ok(OpCode::Return));
    }

    #[test]
    fn read_op_errors() {
        let mut c = Chunk::new();
        c.write(0xFE).unwrap();
        assert_eq!(
            c.read_op(0),
            Err(CoreError::InvalidOpcode { offset: 0, byte: 0xFE })
        );
        assert_eq!(c.read_op(1), Err(CoreError::OutOfBounds { offset: 1, count: 1 }));
    }

    #[test]
    fn write_all_lands_on_policy_sequence() {
        let mut c = Chunk::new();
        c.write_all(&[0; 17]).unwrap();
        assert_eq!(c.count(), 17);
        assert_eq!(c.capacity(), 32);
    }

    #[test]
    fn custom_policy_chunk() {
        let mut c = Chunk::with_policy(Doubling::new(4, 4));
        for _ in 0..5 {
            c.write(0).unwrap();
        }
        assert_eq!(c.capacity(), 16);
        assert_eq!(c.policy(), &Doubling::new(4, 4));
    }

    #[test]
    fn write_all_with_stalled_policy_keeps_chunk() {
        let mut c = Chunk::with_policy(Doubling::new(2, 1));
        let before = c.clone();
        assert_eq!(
            c.write_all(&[0; 3]),
            Err(CoreError::CapacityOverflow { count: 0 })
        );
        assert_eq!(c, before);
        assert_eq!((c.count(), c.capacity()), (0, 0));
    }

    #[test]
    fn cloned_chunk_grows_like_the_original() {
        let mut a = Chunk::new();
        a.write_all(&[1, 2, 3]).unwrap();
        let mut b = a.clone();
        for byte in 4..=9u8 {
            a.write(byte).unwrap();
            b.write(byte).unwrap();
            assert_eq!(a.capacity(), b.capacity());
        }
        assert_eq!(a, b);
        assert_eq!(b.capacity(), 16);
    }

    #[test]
    fn free_resets() {
        let mut c = Chunk::new();
        c.write_all(&[1, 2, 3]).unwrap();
        c.free();
        assert_eq!(c, Chunk::new());
    }
}
