//! Distortion metrics between a reference signal and a processed copy.

use serde::Serialize;

use crate::error::{CodecError, CodecResult};

/// Mean squared error and signal-to-noise ratio of a distorted signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Distortion {
    /// Mean squared error.
    pub mse: f64,
    /// `10 * log10(power / mse)` in dB, `+inf` when `mse` is zero.
    ///
    /// Serialized as `null` when infinite.
    pub snr_db: f64,
}

/// Compares `distorted` against `original`.
///
/// # Errors
/// [`CodecError::EmptySignal`] for empty input and
/// [`CodecError::LengthMismatch`] when the lengths differ.
pub fn evaluate(original: &[f64], distorted: &[f64]) -> CodecResult<Distortion> {
    check_pair(original, distorted)?;

    let mse = mean(
        original
            .iter()
            .zip(distorted)
            .map(|(&o, &d)| (o - d) * (o - d)),
        original.len(),
    );

    Ok(Distortion {
        mse,
        snr_db: snr_db(signal_power(original), mse),
    })
}

/// Mean absolute error between two equal-length signals.
pub fn mean_absolute_error(original: &[f64], distorted: &[f64]) -> CodecResult<f64> {
    check_pair(original, distorted)?;
    Ok(mean(
        original.iter().zip(distorted).map(|(&o, &d)| (o - d).abs()),
        original.len(),
    ))
}

/// Mean of the squared samples; 0.0 for an empty slice.
pub fn signal_power(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    mean(signal.iter().map(|&x| x * x), signal.len())
}

/// SNR in dB for a given signal power and noise power (MSE).
pub fn snr_db(power: f64, mse: f64) -> f64 {
    if mse > 0.0 {
        10.0 * (power / mse).log10()
    } else {
        f64::INFINITY
    }
}

fn check_pair(original: &[f64], distorted: &[f64]) -> CodecResult<()> {
    if original.len() != distorted.len() {
        return Err(CodecError::LengthMismatch {
            original: original.len(),
            distorted: distorted.len(),
        });
    }
    if original.is_empty() {
        return Err(CodecError::EmptySignal);
    }
    Ok(())
}

fn mean(values: impl Iterator<Item = f64>, len: usize) -> f64 {
    values.sum::<f64>() / len as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_signals() {
        let s = [0.3, -0.7, 0.1];
        let d = evaluate(&s, &s).unwrap();
        assert_eq!(d.mse, 0.0);
        assert_eq!(d.snr_db, f64::INFINITY);
    }

    #[test]
    fn test_single_flipped_sample() {
        let d = evaluate(&[1.0, 1.0, 1.0], &[1.0, 1.0, -1.0]).unwrap();
        assert!((d.mse - 4.0 / 3.0).abs() < 1e-12);
        assert!((d.snr_db - (-1.2493873660829993)).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_mismatch_and_empty() {
        assert_eq!(
            evaluate(&[1.0], &[1.0, 2.0]),
            Err(CodecError::LengthMismatch {
                original: 1,
                distorted: 2
            })
        );
        assert_eq!(evaluate(&[], &[]), Err(CodecError::EmptySignal));
    }

    #[test]
    fn test_mean_absolute_error() {
        let mae = mean_absolute_error(&[0.0, 1.0], &[0.5, 0.0]).unwrap();
        assert!((mae - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_silent_reference_gives_negative_infinity() {
        let d = evaluate(&[0.0, 0.0], &[0.1, 0.0]).unwrap();
        assert_eq!(d.snr_db, f64::NEG_INFINITY);
    }

    #[test]
    fn test_full_scale_sine_power() {
        let sine: Vec<f64> = (0..1000)
            .map(|i| (2.0 * std::f64::consts::PI * i as f64 / 100.0).sin())
            .collect();
        assert!((signal_power(&sine) - 0.5).abs() < 1e-9);
    }
}
