//! End-to-end runs: encode, corrupt, measure.
//!
//! These functions chain the quantizer, the DPCM coder, the error injector and
//! the evaluator into the analyses a report is built from. Distortion is
//! always measured against the original input, never against the clean
//! reconstruction.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::channel::{inject_errors, ErrorRate};
use crate::config::ExperimentConfig;
use crate::dpcm::{dpcm_encode, DpcmOutput};
use crate::error::{CodecError, CodecResult};
use crate::metrics::{evaluate, mean_absolute_error, snr_db, signal_power, Distortion};
use crate::quantizer::{quantize, quantize_1bit, BitDepth};
use crate::rng::{create_rng, create_trial_rng, derive_stage_seed};
use crate::signal::Signal;

/// DPCM output after passing through the synthetic channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorSimulation {
    /// Clean encoder output.
    pub encoded: DpcmOutput,
    /// Reconstruction with channel errors applied.
    pub corrupted: Vec<f64>,
    /// Number of corrupted samples.
    pub num_errors: usize,
}

/// Encodes `signal` with DPCM and corrupts the reconstruction.
pub fn simulate_with_errors<R: Rng + ?Sized>(
    signal: &[f64],
    depth: BitDepth,
    rate: ErrorRate,
    rng: &mut R,
) -> CodecResult<ErrorSimulation> {
    let encoded = dpcm_encode(signal, depth)?;
    let injection = inject_errors(&encoded.reconstructed, rate, rng);
    Ok(ErrorSimulation {
        encoded,
        corrupted: injection.corrupted,
        num_errors: injection.num_errors,
    })
}

/// One row of the plain-quantizer resolution table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionReport {
    /// Row label, e.g. `"8 bits"` or `"1 bit (threshold)"`.
    pub label: String,
    /// Resolution in bits.
    pub bits: u32,
    /// Whether this row used the hard-threshold quantizer.
    pub threshold: bool,
    /// Mean squared error.
    pub mse: f64,
    /// SNR in dB.
    pub snr_db: f64,
    /// Mean absolute error.
    pub mean_abs_error: f64,
}

/// Quantizes `signal` at each resolution and measures the distortion.
///
/// With `include_one_bit`, a final row for the hard-threshold quantizer is
/// appended.
pub fn resolution_sweep(
    signal: &[f64],
    depths: &[BitDepth],
    include_one_bit: bool,
) -> CodecResult<Vec<ResolutionReport>> {
    let mut rows = Vec::with_capacity(depths.len() + 1);

    for &depth in depths {
        let quantized = quantize(signal, depth);
        rows.push(resolution_row(signal, &quantized, depth.to_string(), depth.bits(), false)?);
    }

    if include_one_bit {
        let quantized = quantize_1bit(signal);
        rows.push(resolution_row(signal, &quantized, "1 bit (threshold)".to_string(), 1, true)?);
    }

    Ok(rows)
}

fn resolution_row(
    signal: &[f64],
    quantized: &[f64],
    label: String,
    bits: u32,
    threshold: bool,
) -> CodecResult<ResolutionReport> {
    let Distortion { mse, snr_db } = evaluate(signal, quantized)?;
    let mean_abs_error = mean_absolute_error(signal, quantized)?;
    debug!(%label, mse, snr_db, "resolution row");
    Ok(ResolutionReport {
        label,
        bits,
        threshold,
        mse,
        snr_db,
        mean_abs_error,
    })
}

/// Averaged distortion for one error rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorRateReport {
    /// Error rate.
    pub error_rate: f64,
    /// DPCM resolution in bits.
    pub bits: u32,
    /// Number of independent injections averaged.
    pub trials: u32,
    /// Corrupted samples per trial (identical across trials).
    pub num_errors: usize,
    /// MSE averaged over trials.
    pub mean_mse: f64,
    /// SNR in dB computed from `mean_mse`.
    pub snr_db: f64,
}

/// Runs the DPCM error simulation at every rate.
///
/// The signal is encoded once. Each (rate, trial) pair gets its own generator
/// derived from `seed`, so adding rates or trials does not change the draws of
/// the existing ones.
pub fn error_rate_sweep(
    signal: &[f64],
    depth: BitDepth,
    rates: &[ErrorRate],
    trials: u32,
    seed: u32,
) -> CodecResult<Vec<ErrorRateReport>> {
    if trials == 0 {
        return Err(CodecError::invalid_param("trials", "must be at least 1"));
    }

    let encoded = dpcm_encode(signal, depth)?;
    let power = signal_power(signal);

    rates
        .iter()
        .enumerate()
        .map(|(rate_index, &rate)| -> CodecResult<ErrorRateReport> {
            let mut total_mse = 0.0;
            let mut num_errors = 0;
            for trial in 0..trials {
                let mut rng = create_trial_rng(seed, rate_index as u32, trial);
                let injection = inject_errors(&encoded.reconstructed, rate, &mut rng);
                total_mse += evaluate(signal, &injection.corrupted)?.mse;
                num_errors = injection.num_errors;
            }

            let mean_mse = total_mse / trials as f64;
            let report = ErrorRateReport {
                error_rate: rate.value(),
                bits: depth.bits(),
                trials,
                num_errors,
                mean_mse,
                snr_db: snr_db(power, mean_mse),
            };
            debug!(
                rate = report.error_rate,
                num_errors,
                snr_db = report.snr_db,
                "error rate point"
            );
            Ok(report)
        })
        .collect()
}

/// PCM, clean DPCM and corrupted DPCM renditions of one signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodecComparison {
    /// Shared resolution in bits.
    pub bits: u32,
    /// Error rate applied to the DPCM output.
    pub error_rate: f64,
    /// Number of corrupted samples.
    pub num_errors: usize,
    /// Plain quantizer distortion.
    pub pcm: Distortion,
    /// Clean DPCM distortion.
    pub dpcm: Distortion,
    /// Corrupted DPCM distortion.
    pub dpcm_with_errors: Distortion,
    /// Plain quantizer output.
    #[serde(skip)]
    pub pcm_samples: Vec<f64>,
    /// Clean DPCM reconstruction.
    #[serde(skip)]
    pub dpcm_samples: Vec<f64>,
    /// Corrupted DPCM reconstruction.
    #[serde(skip)]
    pub dpcm_error_samples: Vec<f64>,
}

/// Runs the three codec paths on `signal` at the same resolution.
pub fn compare_codecs<R: Rng + ?Sized>(
    signal: &[f64],
    depth: BitDepth,
    rate: ErrorRate,
    rng: &mut R,
) -> CodecResult<CodecComparison> {
    let pcm_samples = quantize(signal, depth);
    let simulation = simulate_with_errors(signal, depth, rate, rng)?;

    let comparison = CodecComparison {
        bits: depth.bits(),
        error_rate: rate.value(),
        num_errors: simulation.num_errors,
        pcm: evaluate(signal, &pcm_samples)?,
        dpcm: evaluate(signal, &simulation.encoded.reconstructed)?,
        dpcm_with_errors: evaluate(signal, &simulation.corrupted)?,
        pcm_samples,
        dpcm_samples: simulation.encoded.reconstructed,
        dpcm_error_samples: simulation.corrupted,
    };
    debug!(
        bits = comparison.bits,
        num_errors = comparison.num_errors,
        "codec comparison"
    );
    Ok(comparison)
}

/// Everything an experiment measured.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentReport {
    /// Seed the run used.
    pub seed: u32,
    /// Input sample rate in Hz.
    pub sample_rate: u32,
    /// Input length in samples.
    pub num_samples: usize,
    /// Mean power of the input.
    pub signal_power: f64,
    /// Plain quantizer table.
    pub resolutions: Vec<ResolutionReport>,
    /// DPCM error-rate sweep.
    pub error_rates: Vec<ErrorRateReport>,
    /// Codec comparison, if configured.
    pub comparison: Option<CodecComparison>,
}

/// Runs every analysis in `config` on `signal`.
///
/// The signal is passed separately so callers can load `wav` sources
/// themselves; `config.signal` is not consulted here.
pub fn run_experiment(config: &ExperimentConfig, signal: &Signal) -> CodecResult<ExperimentReport> {
    config.validate()?;
    if signal.is_empty() {
        return Err(CodecError::EmptySignal);
    }

    info!(
        samples = signal.len(),
        sample_rate = signal.sample_rate,
        seed = config.seed,
        "running experiment"
    );

    let resolutions =
        resolution_sweep(&signal.samples, &config.resolutions, config.include_one_bit)?;
    let error_rates = error_rate_sweep(
        &signal.samples,
        config.dpcm_bits,
        &config.error_rates,
        config.trials,
        config.seed,
    )?;
    let comparison = config
        .comparison
        .map(|c| {
            let mut rng = create_rng(derive_stage_seed(config.seed, "comparison"));
            compare_codecs(&signal.samples, c.bits, c.error_rate, &mut rng)
        })
        .transpose()?;

    Ok(ExperimentReport {
        seed: config.seed,
        sample_rate: signal.sample_rate,
        num_samples: signal.len(),
        signal_power: signal_power(&signal.samples),
        resolutions,
        error_rates,
        comparison,
    })
}
