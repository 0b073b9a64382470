//! Seeded PCG32 generators for reproducible error injection.
//!
//! Every random draw in an experiment comes from a generator built here.
//! Per-trial streams are derived from the experiment seed with BLAKE3 so that
//! trials are independent but repeatable.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The seed is duplicated into both halves of the 64-bit PCG state seed.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Derives the seed for one trial of one error-rate point.
///
/// Hashes `base_seed`, `rate_index` and `trial` (little-endian) and keeps the
/// first four bytes of the digest.
pub fn derive_trial_seed(base_seed: u32, rate_index: u32, trial: u32) -> u32 {
    let mut input = Vec::with_capacity(12);
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(&rate_index.to_le_bytes());
    input.extend_from_slice(&trial.to_le_bytes());
    truncate_digest(blake3::hash(&input))
}

/// Derives a seed for a named stage of an experiment (e.g. `"voice"`).
pub fn derive_stage_seed(base_seed: u32, stage: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + stage.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(stage.as_bytes());
    truncate_digest(blake3::hash(&input))
}

fn truncate_digest(hash: blake3::Hash) -> u32 {
    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Creates the generator for one trial; see [`derive_trial_seed`].
pub fn create_trial_rng(base_seed: u32, rate_index: u32, trial: u32) -> Pcg32 {
    create_rng(derive_trial_seed(base_seed, rate_index, trial))
}
