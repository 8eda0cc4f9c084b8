//! poke-benches: données partagées par les benchmarks Criterion.

/// Tailles de chunk mesurées (octets).
pub const SIZES: [usize; 5] = [16, 256, 1024, 16 * 1024, 64 * 1024];

/// Octets de charge utile déterministes (tous `OP_RETURN` pour rester valides).
pub fn payload(len: usize) -> Vec<u8> {
    vec![poke_core::OpCode::Return.as_byte(); len]
}

/// Lit un entier depuis l’environnement, avec valeur par défaut.
pub fn env_usize(k: &str, d: usize) -> usize {
    std::env::var(k).ok().and_then(|s| s.parse().ok()).unwrap_or(d)
}

/// Idem pour `u64`.
pub fn env_u64(k: &str, d: u64) -> u64 {
    std::env::var(k).ok().and_then(|s| s.parse().ok()).unwrap_or(d)
}
