//! Instruction opcodes.
//!
//! One opcode is one byte in a chunk. Only the byte values listed in
//! [`OpCode::ALL`] are legal; anything else decodes to an error.

use thiserror::Error;

/// Instruction kinds understood by the VM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[non_exhaustive]
pub enum OpCode {
    /// Return from the current function.
    Return = 0x00,
}

/// Byte that names no [`OpCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OpCodeError {
    /// Unrecognized opcode byte.
    #[error("unknown opcode 0x{0:02X}")]
    Unknown(u8),
}

impl OpCode {
    /// Every opcode, in byte order.
    pub const ALL: [Self; 1] = [Self::Return];

    /// Decode from a chunk byte.
    pub const fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x00 => Some(Self::Return),
            _ => None,
        }
    }

    /// Encode for a chunk.
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Mnemonic used by the disassembler.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Return => "OP_RETURN",
        }
    }

    /// Encoded size in bytes, operands included.
    pub const fn size(self) -> usize {
        match self {
            Self::Return => 1,
        }
    }
}

impl TryFrom<u8> for OpCode {
    type Error = OpCodeError;

    fn try_from(b: u8) -> Result<Self, Self::Error> {
        Self::from_byte(b).ok_or(OpCodeError::Unknown(b))
    }
}

impl From<OpCode> for u8 {
    fn from(op: OpCode) -> Self {
        op.as_byte()
    }
}
