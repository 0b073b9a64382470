//! Uniform and 1-bit scalar quantizers.
//!
//! Samples are expected in [-1, 1]. The quantizer does not clamp before
//! normalizing, so out-of-range input produces out-of-range output; callers
//! that cannot guarantee the range should clamp first.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};

/// Quantization resolution in bits.
///
/// Always at least 1, so the number of levels is at least 2 and the
/// quantization step is finite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BitDepth(u32);

impl BitDepth {
    /// Largest supported resolution; keeps `levels` exactly representable.
    pub const MAX_BITS: u32 = 32;

    /// Creates a bit depth, rejecting 0 and anything above [`Self::MAX_BITS`].
    pub fn new(bits: u32) -> CodecResult<Self> {
        if (1..=Self::MAX_BITS).contains(&bits) {
            Ok(Self(bits))
        } else {
            Err(CodecError::InvalidBitDepth { bits })
        }
    }

    /// Const constructor for known-good literals inside the crate.
    pub(crate) const fn from_literal(bits: u32) -> Self {
        assert!(bits >= 1 && bits <= Self::MAX_BITS);
        Self(bits)
    }

    /// Number of bits.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Number of reconstruction levels, `2^bits`.
    pub fn levels(self) -> u64 {
        1u64 << self.0
    }

    /// Highest level index, `levels - 1`, as a float.
    pub(crate) fn max_index(self) -> f64 {
        (self.levels() - 1) as f64
    }

    /// Distance between adjacent reconstruction levels in [-1, 1].
    pub fn quant_step(self) -> f64 {
        2.0 / self.max_index()
    }
}

impl TryFrom<u32> for BitDepth {
    type Error = CodecError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

impl From<BitDepth> for u32 {
    fn from(depth: BitDepth) -> Self {
        depth.0
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bits", self.0)
    }
}

/// Quantizes one sample to the nearest of `2^bits` levels spanning [-1, 1].
pub fn quantize_sample(sample: f64, depth: BitDepth) -> f64 {
    let max_index = depth.max_index();
    let normalized = (sample + 1.0) / 2.0;
    let level = (normalized * max_index).round() / max_index;
    level * 2.0 - 1.0
}

/// Quantizes every sample of `signal` at the given resolution.
pub fn quantize(signal: &[f64], depth: BitDepth) -> Vec<f64> {
    signal.iter().map(|&x| quantize_sample(x, depth)).collect()
}

/// Hard sign threshold: `+1` for `x >= 0`, `-1` otherwise.
///
/// This is not `quantize_sample(x, 1)`. The uniform path normalizes first, so
/// negative samples too small to survive `(x + 1) / 2` land on the midpoint
/// and round up to +1, while the threshold still maps them to -1.
pub fn quantize_1bit_sample(sample: f64) -> f64 {
    if sample >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Applies [`quantize_1bit_sample`] to every sample.
pub fn quantize_1bit(signal: &[f64]) -> Vec<f64> {
    signal.iter().map(|&x| quantize_1bit_sample(x)).collect()
}

/// Lists the output alphabet of [`quantize`] in ascending order.
///
/// Values are computed with the same arithmetic as the quantizer, so every
/// quantized sample compares exactly equal to one of them.
pub fn reconstruction_levels(depth: BitDepth) -> Vec<f64> {
    let max_index = depth.max_index();
    (0..depth.levels())
        .map(|k| (k as f64 / max_index) * 2.0 - 1.0)
        .collect()
}
