//! Synthetic channel errors.
//!
//! A fixed fraction of sample positions is chosen uniformly at random, without
//! repetition, and each chosen sample is replaced by `-x * 0.5`. This stands in
//! for a bit-flip class error; it is not a model of any real channel.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{CodecError, CodecResult};

/// Fraction of sample positions to corrupt, in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ErrorRate(f64);

impl ErrorRate {
    /// No corruption.
    pub const ZERO: ErrorRate = ErrorRate(0.0);

    /// Creates an error rate, rejecting NaN and values outside [0, 1].
    pub fn new(rate: f64) -> CodecResult<Self> {
        if (0.0..=1.0).contains(&rate) {
            Ok(Self(rate))
        } else {
            Err(CodecError::InvalidErrorRate { rate })
        }
    }

    /// Const constructor for known-good literals inside the crate.
    pub(crate) const fn from_literal(rate: f64) -> Self {
        Self(rate)
    }

    /// The rate as a fraction.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Number of positions corrupted in a sequence of `len` samples.
    pub fn error_count(self, len: usize) -> usize {
        // Truncation toward zero, which is floor for a non-negative product.
        (self.0 * len as f64) as usize
    }
}

impl TryFrom<f64> for ErrorRate {
    type Error = CodecError;

    fn try_from(rate: f64) -> Result<Self, Self::Error> {
        Self::new(rate)
    }
}

impl From<ErrorRate> for f64 {
    fn from(rate: ErrorRate) -> Self {
        rate.0
    }
}

impl fmt::Display for ErrorRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of [`inject_errors`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Injection {
    /// Copy of the input with the selected positions corrupted.
    pub corrupted: Vec<f64>,
    /// Number of corrupted positions.
    pub num_errors: usize,
    /// Corrupted positions, in the order they were drawn.
    pub positions: Vec<usize>,
}

/// The corruption applied to each selected sample.
pub fn corrupt_sample(sample: f64) -> f64 {
    -sample * 0.5
}

/// Corrupts `floor(rate * len)` distinct positions of `signal`.
///
/// The input is left untouched. Position selection draws from `rng`, so a
/// seeded generator gives a reproducible result.
pub fn inject_errors<R: Rng + ?Sized>(signal: &[f64], rate: ErrorRate, rng: &mut R) -> Injection {
    let num_errors = rate.error_count(signal.len());
    let positions = rand::seq::index::sample(rng, signal.len(), num_errors).into_vec();

    let mut corrupted = signal.to_vec();
    for &idx in &positions {
        trace!(idx, before = corrupted[idx], "corrupting sample");
        corrupted[idx] = corrupt_sample(corrupted[idx]);
    }

    debug!(
        samples = signal.len(),
        rate = rate.value(),
        num_errors,
        "injected channel errors"
    );

    Injection {
        corrupted,
        num_errors,
        positions,
    }
}
