//! Deterministic random sources
//!
//! Engine functions are generic over `Rng`; this is the concrete generator
//! the simulator and binaries seed.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub type CombatRng = ChaCha8Rng;

pub fn seeded_rng(seed: u64) -> CombatRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Seed of an independent stream derived from a base seed
pub fn derive_seed(base: u64, stream: u64) -> u64 {
    base.wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
