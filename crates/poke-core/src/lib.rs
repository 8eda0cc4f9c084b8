//! poke-core: couche de stockage du bytecode Poke
//!
//! Fournit :
//! - `grow_capacity`, `GrowthPolicy`, `Doubling` : politique de croissance (plancher 8, doublement)
//! - `GrowableArray<T>` : tableau possédé à croissance géométrique (`count <= capacity`)
//! - `Chunk` : suite d’octets d’instructions émis par le compilateur
//! - `OpCode` : jeu d’instructions (décodage validé, octet inconnu = erreur)
//! - `disasm` / `helpers` : désassembleur textuel et validation
//! - Erreurs `CoreError` + alias `CoreResult<T>`
//!
//! Features :
//! - `tracing` (par défaut) : trace chaque croissance de buffer (niveau TRACE)
//! - `serde` : (dé)sérialisation de la configuration `Doubling`

#![deny(missing_docs)]

/* ─────────────────────────── Imports ─────────────────────────── */

use thiserror::Error;

/* ─────────────────────────── Modules publics ─────────────────────────── */

/// Politique de capacité (fonction pure + trait remplaçable).
pub mod memory;
/// Tableau générique à croissance pilotée par une politique.
pub mod buffer;
/// Primitives de bytecode (chunk, opcodes, désassembleur, helpers).
pub mod bytecode;

/// Compatibilité : ré-exporte les helpers de validation.
pub use bytecode::helpers;
/// Compatibilité : ré-exporte le désassembleur textuel.
pub use bytecode::disasm;

pub use buffer::GrowableArray;
pub use bytecode::{Chunk, OpCode, OpCodeError};
pub use memory::{grow_capacity, Doubling, GrowthPolicy, GROWTH_FACTOR, MIN_CAPACITY};

/* ─────────────────────────── Résultat commun ─────────────────────────── */

/// Alias résultat commun au core.
pub type CoreResult<T> = core::result::Result<T, CoreError>;

/* ─────────────────────────── Erreurs ─────────────────────────── */

/// Erreurs de la couche de stockage.
///
/// Toute opération qui échoue laisse le buffer dans son état d’avant l’appel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// L’allocateur a refusé le nouveau stockage.
    #[error("allocation failed: could not reserve {requested} slots")]
    AllocationFailed {
        /// Capacité demandée.
        requested: usize,
    },
    /// La politique ne fait plus progresser la capacité (ou `usize` déborde).
    #[error("capacity overflow: cannot grow past {count} elements")]
    CapacityOverflow {
        /// Nombre d’éléments au moment de l’échec.
        count: usize,
    },
    /// Octet qui ne correspond à aucun opcode.
    #[error("invalid opcode 0x{byte:02X} at offset {offset}")]
    InvalidOpcode {
        /// Position de l’octet dans le chunk.
        offset: usize,
        /// Valeur brute.
        byte: u8,
    },
    /// Lecture au-delà de `count`.
    #[error("offset {offset} out of bounds (count={count})")]
    OutOfBounds {
        /// Position demandée.
        offset: usize,
        /// Nombre d’octets écrits.
        count: usize,
    },
}

impl CoreError {
    /// Situe une erreur de décodage d’opcode dans le chunk.
    pub const fn invalid_opcode(offset: usize, err: OpCodeError) -> Self {
        match err {
            OpCodeError::Unknown(byte) => Self::InvalidOpcode { offset, byte },
        }
    }
}

/* ─────────────────────────── Prélude (reexports utiles) ─────────────────────────── */

/// Prélude pratique pour importer les types/funcs clés du crate.
pub mod prelude {
    /// Réexports utiles pour une importation rapide.
    pub use super::{
        grow_capacity, Chunk, CoreError, CoreResult, Doubling, GrowableArray, GrowthPolicy,
        OpCode, OpCodeError, GROWTH_FACTOR, MIN_CAPACITY,
    };
}

/* ─────────────────────────── Tests ─────────────────────────── */
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            CoreError::AllocationFailed { requested: 16 }.to_string(),
            "allocation failed: could not reserve 16 slots"
        );
        assert_eq!(
            CoreError::InvalidOpcode { offset: 3, byte: 0x0A }.to_string(),
            "invalid opcode 0x0A at offset 3"
        );
        assert!(CoreError::CapacityOverflow { count: 8 }.to_string().contains('8'));
    }

    #[test]
    fn opcode_error_is_located() {
        assert_eq!(
            CoreError::invalid_opcode(5, OpCodeError::Unknown(0xFF)),
            CoreError::InvalidOpcode { offset: 5, byte: 0xFF }
        );
    }

    #[test]
    fn prelude_builds_a_chunk() -> CoreResult<()> {
        use crate::prelude::*;
        let mut chunk = Chunk::new();
        chunk.write_op(OpCode::Return)?;
        assert_eq!(chunk.capacity(), MIN_CAPACITY);
        Ok(())
    }
}
