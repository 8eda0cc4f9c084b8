// crates/poke-tools/src/bin/poke-disasm.rs
//! Désassembleur Poke : octets bruts → chunk → texte/JSON.
//!
//! Exemples :
//!   poke-disasm --demo
//!   poke-disasm a.bin b.bin
//!   cat a.bin | poke-disasm - --stdin-name a.bin --json | jq
//!   poke-disasm a.bin --min-capacity 4 --growth-factor 3 -vvv
//!
//! Options utiles :
//!   --demo            : chunk de démonstration (un OP_RETURN)
//!   --json            : imprime une vue JSON structurée
//!   --emit <f>        : écrit la sortie dans un fichier (si 1 entrée)
//!   --strict          : échec au premier octet inconnu
//!   --min-capacity    : plancher de la politique de croissance
//!   --growth-factor   : multiplicateur de la politique de croissance
//!   -v / -q           : verbosité des traces (RUST_LOG a priorité)

use anyhow::{anyhow, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser};

use poke_core::{GROWTH_FACTOR, MIN_CAPACITY};
use poke_tools::{
    build_json, demo_chunk, disassemble_chunk, init_tracing, load_chunk, read_input,
    validate_chunk, write_text, Chunk, Doubling,
};

#[derive(Parser, Debug)]
#[command(name = "poke-disasm", version, about = "Désassembleur Poke (octets bruts -> texte/JSON)")]
struct Cli {
    /// Fichier(s) d’octets à analyser (ou '-' pour stdin, unique)
    inputs: Vec<String>,

    /// Désassemble le chunk de démonstration au lieu des entrées
    #[arg(long, conflicts_with = "inputs")]
    demo: bool,

    /// Affiche un JSON structuré sur stdout
    #[arg(long)]
    json: bool,

    /// Fichier où écrire la sortie (si 1 entrée)
    #[arg(long)]
    emit: Option<String>,

    /// Échec si un octet ne décode en aucun opcode
    #[arg(long)]
    strict: bool,

    /// Nom logique quand l’entrée est '-' (stdin)
    #[arg(long, default_value = "<stdin>")]
    stdin_name: String,

    /// Capacité plancher de la politique de croissance
    #[arg(long, default_value_t = MIN_CAPACITY)]
    min_capacity: usize,

    /// Multiplicateur de la politique de croissance
    #[arg(long, default_value_t = GROWTH_FACTOR)]
    growth_factor: usize,

    /// Verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Silencieux (erreurs uniquement)
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    if let Err(e) = real_main() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let policy = Doubling::new(cli.min_capacity, cli.growth_factor);
    tracing::debug!(?policy, "growth policy");

    if cli.demo {
        let chunk = demo_chunk(policy)?;
        return emit(&chunk, Utf8Path::new("demo"), &cli);
    }

    if cli.inputs.is_empty() {
        return Err(anyhow!("aucune entrée. Exemple: poke-disasm a.bin (ou --demo)"));
    }
    if cli.inputs.len() > 1 && cli.inputs.iter().any(|i| i == "-") {
        return Err(anyhow!("'-' (stdin) doit être l’unique entrée"));
    }
    if cli.inputs.len() > 1 && cli.emit.is_some() {
        return Err(anyhow!("--emit n’accepte qu’une seule entrée"));
    }

    for inp in &cli.inputs {
        let (bytes, name) = read_input(inp, &cli.stdin_name)?;
        let chunk = load_chunk(&bytes, policy).with_context(|| format!("chargement échoué: {name}"))?;
        emit(&chunk, &name, &cli)?;
    }
    Ok(())
}

fn emit(chunk: &Chunk, name: &Utf8Path, cli: &Cli) -> Result<()> {
    if cli.strict {
        validate_chunk(chunk).with_context(|| format!("chunk invalide: {name}"))?;
    }

    let title = name.file_name().unwrap_or("chunk");
    let out = if cli.json {
        serde_json::to_string_pretty(&build_json(chunk, title))? + "\n"
    } else {
        disassemble_chunk(chunk, title)
    };

    match &cli.emit {
        Some(file) => {
            let path = Utf8PathBuf::from(file);
            write_text(&path, &out)?;
            tracing::info!(%path, "output written");
        }
        None => print!("{out}"),
    }
    Ok(())
}
