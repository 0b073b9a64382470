//! Experiment configuration.
//!
//! An experiment is described by a JSON document. Every field is optional;
//! omitted fields fall back to the classic demonstration (a 1 kHz sine at
//! 8 kHz for two seconds, a 8/6/4/3/2-bit resolution table, 4-bit DPCM at
//! error rates 1e-2 and 1e-3, and an 8-bit PCM vs DPCM comparison).
//!
//! ```json
//! {
//!   "seed": 7,
//!   "signal": { "type": "wav", "path": "speech.wav", "max_seconds": 3.0 },
//!   "dpcm_bits": 8,
//!   "error_rates": [0.01]
//! }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::channel::ErrorRate;
use crate::error::{CodecError, CodecResult};
use crate::quantizer::BitDepth;
use crate::signal::Signal;

/// Where the experiment's input comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignalSource {
    /// Pure tone, see [`Signal::sine`].
    Sine {
        /// Tone frequency in Hz.
        frequency: f64,
        /// Length in seconds.
        duration_seconds: f64,
        /// Sample rate in Hz.
        sample_rate: u32,
        /// Peak amplitude.
        #[serde(default = "default_amplitude")]
        amplitude: f64,
    },
    /// Harmonic vowel stand-in, see [`Signal::synthetic_voice`].
    Voice {
        /// Sample rate in Hz.
        #[serde(default = "default_voice_rate")]
        sample_rate: u32,
        /// Length in seconds.
        #[serde(default = "default_voice_seconds")]
        duration_seconds: f64,
    },
    /// A WAV recording. Loading is left to the caller.
    Wav {
        /// File to read.
        path: PathBuf,
        /// Keep at most this many seconds.
        #[serde(default)]
        max_seconds: Option<f64>,
    },
}

impl Default for SignalSource {
    fn default() -> Self {
        SignalSource::Sine {
            frequency: 1000.0,
            duration_seconds: 2.0,
            sample_rate: 8000,
            amplitude: default_amplitude(),
        }
    }
}

impl SignalSource {
    /// Whether [`SignalSource::synthesize`] can produce the signal.
    pub fn is_synthetic(&self) -> bool {
        !matches!(self, SignalSource::Wav { .. })
    }

    /// Generates a synthetic signal.
    ///
    /// # Errors
    /// Generator parameter errors, or [`CodecError::InvalidParameter`] for a
    /// `wav` source, which has to be loaded from disk.
    pub fn synthesize(&self) -> CodecResult<Signal> {
        match self {
            SignalSource::Sine {
                frequency,
                duration_seconds,
                sample_rate,
                amplitude,
            } => Signal::sine(*frequency, *duration_seconds, *sample_rate, *amplitude),
            SignalSource::Voice {
                sample_rate,
                duration_seconds,
            } => Signal::synthetic_voice(*sample_rate, *duration_seconds),
            SignalSource::Wav { path, .. } => Err(CodecError::invalid_param(
                "signal",
                format!("'{}' is a recording and must be loaded", path.display()),
            )),
        }
    }
}

/// Settings for the PCM vs DPCM vs DPCM-with-errors comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Resolution shared by the PCM and DPCM paths.
    #[serde(default = "default_comparison_bits")]
    pub bits: BitDepth,
    /// Error rate applied to the DPCM output.
    #[serde(default = "default_comparison_rate")]
    pub error_rate: ErrorRate,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            bits: default_comparison_bits(),
            error_rate: default_comparison_rate(),
        }
    }
}

/// A complete experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Base seed for every random draw.
    pub seed: u32,
    /// Input signal.
    pub signal: SignalSource,
    /// Resolutions for the plain quantizer table.
    pub resolutions: Vec<BitDepth>,
    /// Add the 1-bit hard-threshold row to the table.
    pub include_one_bit: bool,
    /// DPCM resolution for the error-rate sweep.
    pub dpcm_bits: BitDepth,
    /// Error rates for the sweep.
    pub error_rates: Vec<ErrorRate>,
    /// Independent injections averaged per error rate.
    pub trials: u32,
    /// Codec comparison; `null` skips it.
    pub comparison: Option<ComparisonConfig>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            signal: SignalSource::default(),
            resolutions: [8, 6, 4, 3, 2]
                .into_iter()
                .map(BitDepth::from_literal)
                .collect(),
            include_one_bit: true,
            dpcm_bits: BitDepth::from_literal(4),
            error_rates: vec![ErrorRate::from_literal(0.01), ErrorRate::from_literal(0.001)],
            trials: 1,
            comparison: Some(ComparisonConfig::default()),
        }
    }
}

impl ExperimentConfig {
    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> CodecResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CodecError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to pretty JSON.
    pub fn to_json_pretty(&self) -> CodecResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CodecError::InvalidConfig(e.to_string()))
    }

    /// Checks cross-field constraints that the field types cannot express.
    pub fn validate(&self) -> CodecResult<()> {
        if self.resolutions.is_empty() && !self.include_one_bit {
            return Err(CodecError::invalid_param(
                "resolutions",
                "at least one resolution (or include_one_bit) is required",
            ));
        }
        if self.error_rates.is_empty() {
            return Err(CodecError::invalid_param(
                "error_rates",
                "at least one error rate is required",
            ));
        }
        if self.trials == 0 {
            return Err(CodecError::invalid_param("trials", "must be at least 1"));
        }

        match &self.signal {
            SignalSource::Wav { max_seconds, .. } => {
                if let Some(max) = max_seconds {
                    if !max.is_finite() || *max <= 0.0 {
                        return Err(CodecError::invalid_param(
                            "max_seconds",
                            format!("must be positive, got {max}"),
                        ));
                    }
                }
            }
            source => {
                // Generating is cheap and runs the generator's own checks.
                source.synthesize()?;
            }
        }

        Ok(())
    }
}

fn default_amplitude() -> f64 {
    1.0
}

fn default_voice_rate() -> u32 {
    16_000
}

fn default_voice_seconds() -> f64 {
    3.0
}

fn default_comparison_bits() -> BitDepth {
    BitDepth::from_literal(8)
}

fn default_comparison_rate() -> ErrorRate {
    ErrorRate::from_literal(0.01)
}
