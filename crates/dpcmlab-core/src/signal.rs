//! Sample buffers and synthetic test signals.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};

/// A mono sequence of samples nominally in [-1, 1] with its sample rate.
///
/// The coder never looks at `sample_rate`; it travels with the samples so
/// the result can be written back out or played at the right speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Samples, oldest first.
    pub samples: Vec<f64>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl Signal {
    /// Wraps existing samples.
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> CodecResult<Self> {
        validate_sample_rate(sample_rate)?;
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// A sine of `frequency` Hz sampled at `t = i / sample_rate`.
    ///
    /// Produces `floor(sample_rate * duration_seconds)` samples; the end point
    /// is excluded so the tone tiles seamlessly.
    pub fn sine(
        frequency: f64,
        duration_seconds: f64,
        sample_rate: u32,
        amplitude: f64,
    ) -> CodecResult<Self> {
        validate_sample_rate(sample_rate)?;
        validate_duration(duration_seconds)?;
        if !frequency.is_finite() || frequency < 0.0 {
            return Err(CodecError::invalid_param(
                "frequency",
                format!("must be a non-negative number of Hz, got {frequency}"),
            ));
        }
        if !amplitude.is_finite() {
            return Err(CodecError::invalid_param("amplitude", "must be finite"));
        }

        let fs = sample_rate as f64;
        let num_samples = (fs * duration_seconds) as usize;
        let samples = (0..num_samples)
            .map(|i| amplitude * (2.0 * PI * frequency * i as f64 / fs).sin())
            .collect();

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// A vowel-like test tone used when no recording is available.
    ///
    /// Three harmonics at 200, 400 and 800 Hz (weights 0.5, 0.3, 0.2) under a
    /// Gaussian envelope centred on the middle of the clip, normalized so the
    /// peak magnitude is 1. The time grid includes both end points.
    pub fn synthetic_voice(sample_rate: u32, duration_seconds: f64) -> CodecResult<Self> {
        validate_sample_rate(sample_rate)?;
        validate_duration(duration_seconds)?;

        let num_samples = (sample_rate as f64 * duration_seconds) as usize;
        let dt = if num_samples > 1 {
            duration_seconds / (num_samples - 1) as f64
        } else {
            0.0
        };
        let centre = duration_seconds / 2.0;

        let mut samples: Vec<f64> = (0..num_samples)
            .map(|i| {
                let t = i as f64 * dt;
                let tone = 0.5 * (2.0 * PI * 200.0 * t).sin()
                    + 0.3 * (2.0 * PI * 400.0 * t).sin()
                    + 0.2 * (2.0 * PI * 800.0 * t).sin();
                tone * (-0.5 * (t - centre).powi(2)).exp()
            })
            .collect();

        let peak = samples.iter().fold(0.0f64, |max, s| max.max(s.abs()));
        if peak > 0.0 {
            samples.iter_mut().for_each(|s| *s /= peak);
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the signal has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Keeps at most `max_seconds` worth of samples.
    pub fn truncated(mut self, max_seconds: f64) -> Self {
        let max_samples = (max_seconds.max(0.0) * self.sample_rate as f64) as usize;
        self.samples.truncate(max_samples);
        self
    }
}

fn validate_sample_rate(sample_rate: u32) -> CodecResult<()> {
    if sample_rate == 0 {
        return Err(CodecError::InvalidSampleRate { rate: sample_rate });
    }
    Ok(())
}

fn validate_duration(duration_seconds: f64) -> CodecResult<()> {
    if !duration_seconds.is_finite() || duration_seconds <= 0.0 {
        return Err(CodecError::invalid_param(
            "duration_seconds",
            format!("must be positive, got {duration_seconds}"),
        ));
    }
    Ok(())
}
