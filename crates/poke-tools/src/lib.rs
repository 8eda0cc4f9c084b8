//! poke-tools: Bibliothèque commune pour les outils CLI Poke.
//!
//! - I/O       : `read_input` (fichier ou `-` pour stdin), `write_text`
//! - Chunk     : `load_chunk` (octet par octet, croissance observable), `demo_chunk`
//! - Vues      : `ChunkJson` / `build_json` (résumé sérialisable)
//! - Traces    : `init_tracing` (verbosité `-v`/`-q`, surchargée par `RUST_LOG`)
//!
//! Les fonctions renvoient `anyhow::Result` et ne dépendent que de poke-core.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, unused_must_use)]
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

pub use poke_core::disasm::{disassemble_chunk, disassemble_instruction};
pub use poke_core::helpers::{decode_all, validate_chunk};
pub use poke_core::{Chunk, Doubling, OpCode};

/// Version lisible du crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/* ------------------------------------------------------------------------- */
/* I/O utils                                                                 */
/* ------------------------------------------------------------------------- */

/// Lit une entrée : `-` pour stdin, sinon un fichier. Renvoie les octets et
/// le nom logique à afficher.
pub fn read_input(arg: &str, stdin_name: &str) -> Result<(Vec<u8>, Utf8PathBuf)> {
    if arg == "-" {
        let mut v = Vec::new();
        io::stdin().read_to_end(&mut v).context("lecture stdin")?;
        return Ok((v, Utf8PathBuf::from(stdin_name)));
    }
    let p = Utf8PathBuf::from(arg);
    let v = fs::read(&p).with_context(|| format!("lecture échouée: {p}"))?;
    Ok((v, p))
}

/// Écrit un texte (UTF-8). Crée les dossiers au besoin.
pub fn write_text(path: &Utf8Path, s: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut f = fs::File::create(path).with_context(|| format!("création {path}"))?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/* ------------------------------------------------------------------------- */
/* Chunk                                                                     */
/* ------------------------------------------------------------------------- */

/// Charge des octets bruts dans un chunk neuf, un `write` par octet, pour que
/// chaque croissance passe par la politique (et soit tracée).
pub fn load_chunk(bytes: &[u8], policy: Doubling) -> Result<Chunk> {
    let mut chunk = Chunk::with_policy(policy);
    for (offset, &b) in bytes.iter().enumerate() {
        chunk
            .write(b)
            .with_context(|| format!("écriture de l’octet {offset}"))?;
    }
    tracing::debug!(count = chunk.count(), capacity = chunk.capacity(), "chunk loaded");
    Ok(chunk)
}

/// Chunk de démonstration : un seul `OP_RETURN`.
pub fn demo_chunk(policy: Doubling) -> Result<Chunk> {
    let mut chunk = Chunk::with_policy(policy);
    chunk.write_op(OpCode::Return)?;
    Ok(chunk)
}

/* ------------------------------------------------------------------------- */
/* Vue JSON                                                                  */
/* ------------------------------------------------------------------------- */

/// Résumé sérialisable d’un chunk.
#[derive(Debug, Serialize)]
pub struct ChunkJson<'a> {
    /// Nom logique (fichier ou `<stdin>`).
    pub name: &'a str,
    /// Octets écrits.
    pub count: usize,
    /// Octets réservés.
    pub capacity: usize,
    /// Politique de croissance utilisée.
    pub policy: Doubling,
    /// Vrai si chaque octet décode en opcode connu.
    pub valid: bool,
    /// Message de la première erreur de validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Une entrée par instruction (octets inconnus compris).
    pub instructions: Vec<InstrJson>,
}

/// Instruction désassemblée.
#[derive(Debug, Serialize)]
pub struct InstrJson {
    /// Offset dans le chunk.
    pub offset: usize,
    /// Octet brut.
    pub byte: u8,
    /// Texte du désassembleur.
    pub text: String,
}

/// Construit la vue JSON d’un chunk.
pub fn build_json<'a>(chunk: &Chunk, name: &'a str) -> ChunkJson<'a> {
    let mut instructions = Vec::new();
    let mut offset = 0;
    while offset < chunk.count() {
        let (text, next) = disassemble_instruction(chunk, offset);
        instructions.push(InstrJson {
            offset,
            byte: chunk.get(offset).unwrap_or_default(),
            text,
        });
        offset = next;
    }

    let validation = validate_chunk(chunk);
    ChunkJson {
        name,
        count: chunk.count(),
        capacity: chunk.capacity(),
        policy: *chunk.policy(),
        valid: validation.is_ok(),
        error: validation.err().map(|e| e.to_string()),
        instructions,
    }
}

/* ------------------------------------------------------------------------- */
/* Traces                                                                    */
/* ------------------------------------------------------------------------- */

/// Niveau de filtre par défaut pour une verbosité donnée.
pub const fn level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installe le subscriber `tracing` sur stderr. `RUST_LOG` a priorité.
pub fn init_tracing(verbose: u8, quiet: bool) {
    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level_for(verbose, quiet)));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init();
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = (verbose, quiet);
    }
}
