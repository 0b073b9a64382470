//! Differential PCM with a zero-order predictor.
//!
//! The prediction for each sample is the previous *reconstructed* sample, so
//! the encoder tracks what a decoder would produce and quantization error does
//! not accumulate. The encoder is a single scan over the input carrying that
//! one value; the decoder replays the same accumulation from the residuals.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CodecError, CodecResult};
use crate::quantizer::BitDepth;

/// Output of [`dpcm_encode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DpcmOutput {
    /// Decoder-side reconstruction, every value in [-1, 1].
    pub reconstructed: Vec<f64>,
    /// Quantized prediction residuals; index 0 is always 0.0.
    pub residuals: Vec<f64>,
}

impl DpcmOutput {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.reconstructed.len()
    }

    /// Always false for encoder output, which rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.reconstructed.is_empty()
    }
}

/// Quantizes a prediction residual.
///
/// The residual of two samples in [-1, 1] spans [-2, 2], so it is halved and
/// clipped to [-1, 1], rounded to a multiple of the quantization step, and
/// scaled back up. The grid is symmetric around zero, which makes a zero
/// residual exactly representable.
pub fn quantize_residual(diff: f64, depth: BitDepth) -> f64 {
    let normalized = (diff / 2.0).clamp(-1.0, 1.0);
    let half_span = depth.max_index() / 2.0;
    let unit = ((normalized * half_span).round() / half_span).clamp(-1.0, 1.0);
    unit * 2.0
}

/// Encodes `signal`, returning the reconstruction and the residual sequence.
///
/// # Errors
/// [`CodecError::EmptySignal`] if `signal` has no samples.
pub fn dpcm_encode(signal: &[f64], depth: BitDepth) -> CodecResult<DpcmOutput> {
    let (&first, rest) = signal.split_first().ok_or(CodecError::EmptySignal)?;
    let start = first.clamp(-1.0, 1.0);

    let (reconstructed, residuals): (Vec<f64>, Vec<f64>) = std::iter::once((start, 0.0))
        .chain(rest.iter().scan(start, |prev, &sample| {
            let residual = quantize_residual(sample - *prev, depth);
            *prev = (*prev + residual).clamp(-1.0, 1.0);
            Some((*prev, residual))
        }))
        .unzip();

    debug!(samples = signal.len(), bits = depth.bits(), "dpcm encode");

    Ok(DpcmOutput {
        reconstructed,
        residuals,
    })
}

/// Rebuilds the reconstruction from the first sample and the residuals.
///
/// `residuals[0]` is the sentinel and is ignored. For any encoder output,
/// `dpcm_decode(out.reconstructed[0], &out.residuals)` equals
/// `out.reconstructed`.
///
/// # Errors
/// [`CodecError::EmptySignal`] if `residuals` is empty.
pub fn dpcm_decode(first_sample: f64, residuals: &[f64]) -> CodecResult<Vec<f64>> {
    let (_, rest) = residuals.split_first().ok_or(CodecError::EmptySignal)?;
    let start = first_sample.clamp(-1.0, 1.0);

    Ok(std::iter::once(start)
        .chain(rest.iter().scan(start, |prev, &residual| {
            *prev = (*prev + residual).clamp(-1.0, 1.0);
            Some(*prev)
        }))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn depth(bits: u32) -> BitDepth {
        BitDepth::new(bits).unwrap()
    }

    #[test]
    fn test_constant_signal_holds() {
        let out = dpcm_encode(&[0.5, 0.5, 0.5], depth(8)).unwrap();
        assert_eq!(out.reconstructed, vec![0.5, 0.5, 0.5]);
        assert_eq!(out.residuals, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_first_sample_is_clipped() {
        let out = dpcm_encode(&[1.7, 0.0], depth(4)).unwrap();
        assert_eq!(out.reconstructed[0], 1.0);
        assert_eq!(out.residuals[0], 0.0);
    }

    #[test]
    fn test_empty_signal_rejected() {
        assert_eq!(dpcm_encode(&[], depth(4)), Err(CodecError::EmptySignal));
        assert_eq!(dpcm_decode(0.0, &[]), Err(CodecError::EmptySignal));
    }

    #[test]
    fn test_step_tracks_within_one_quant_step() {
        let d = depth(6);
        let out = dpcm_encode(&[0.0, 0.3, 0.3, 0.3], d).unwrap();
        for &r in &out.reconstructed[1..] {
            assert!((r - 0.3).abs() <= d.quant_step());
        }
    }

    #[test]
    fn test_one_bit_residual_alphabet() {
        let d = depth(1);
        for diff in [-2.0, -1.0, -0.4, 0.0, 0.4, 1.0, 2.0] {
            let r = quantize_residual(diff, d);
            assert!([-2.0, 0.0, 2.0].contains(&r), "diff {diff} gave {r}");
        }
    }

    #[test]
    fn test_residual_scaled_range() {
        let d = depth(3);
        assert_eq!(quantize_residual(10.0, d), 2.0);
        assert_eq!(quantize_residual(-10.0, d), -2.0);
    }

    #[test]
    fn test_decode_replays_encoder() {
        let signal: Vec<f64> = (0..64).map(|i| (i as f64 * 0.3).sin() * 0.9).collect();
        let out = dpcm_encode(&signal, depth(4)).unwrap();
        let decoded = dpcm_decode(out.reconstructed[0], &out.residuals).unwrap();
        assert_eq!(decoded, out.reconstructed);
    }

    #[test]
    fn test_reconstruction_is_clipped() {
        let out = dpcm_encode(&[0.9, 3.0, -3.0, 1.0], depth(2)).unwrap();
        assert!(out.reconstructed.iter().all(|x| (-1.0..=1.0).contains(x)));
    }
}
