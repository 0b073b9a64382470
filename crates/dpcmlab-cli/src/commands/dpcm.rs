//! DPCM command implementation
//!
//! Encodes a signal with DPCM, corrupts the reconstruction at each requested
//! error rate and reports the resulting SNR.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use dpcmlab_core::pipeline::{error_rate_sweep, simulate_with_errors, ErrorRateReport};
use dpcmlab_core::rng::create_trial_rng;
use dpcmlab_core::{BitDepth, SignalSource};
use serde::Serialize;

use super::reporting::{print_error_rate_table, print_json, print_signal_header, print_written};
use super::{ensure_out_dir, parse_rates};
use crate::input::load_signal;
use crate::wav::write_wav;

/// Options for the dpcm command.
#[derive(Debug, Clone)]
pub struct DpcmOptions {
    /// DPCM resolution in bits.
    pub bits: u32,
    /// Error rates to simulate.
    pub error_rates: Vec<f64>,
    /// Base seed.
    pub seed: u32,
    /// Injections averaged per rate.
    pub trials: u32,
}

/// JSON output of the dpcm command.
#[derive(Debug, Serialize)]
pub struct DpcmCommandOutput {
    /// Seed the run used.
    pub seed: u32,
    /// Input sample rate in Hz.
    pub sample_rate: u32,
    /// Input length in samples.
    pub num_samples: usize,
    /// One row per error rate.
    pub error_rates: Vec<ErrorRateReport>,
}

/// Run the dpcm command
///
/// # Arguments
/// * `source` - Signal to encode
/// * `options` - Resolution, error rates, seed and trial count
/// * `out_dir` - Where to write the corrupted WAV files, if anywhere
/// * `json_output` - Print JSON instead of a table
///
/// # Returns
/// Exit code: 0 on success
pub fn run(
    source: &SignalSource,
    options: &DpcmOptions,
    out_dir: Option<&Path>,
    json_output: bool,
) -> Result<ExitCode> {
    let depth = BitDepth::new(options.bits)?;
    let rates = parse_rates(&options.error_rates)?;
    let signal = load_signal(source, None)?;

    let rows = error_rate_sweep(&signal.samples, depth, &rates, options.trials, options.seed)?;

    if !json_output {
        print_signal_header("DPCM with random errors", &signal);
    }

    if let Some(dir) = out_dir {
        ensure_out_dir(dir)?;
        for (index, &rate) in rates.iter().enumerate() {
            // Same draws as trial 0 of the sweep.
            let mut rng = create_trial_rng(options.seed, index as u32, 0);
            let sim = simulate_with_errors(&signal.samples, depth, rate, &mut rng)?;
            let path = dir.join(format!("dpcm_{}bits_p{}.wav", depth.bits(), rate));
            write_wav(&path, &sim.corrupted, signal.sample_rate)?;
            if !json_output {
                print_written(&path);
            }
        }
    }

    if json_output {
        print_json(&DpcmCommandOutput {
            seed: options.seed,
            sample_rate: signal.sample_rate,
            num_samples: signal.len(),
            error_rates: rows,
        })?;
    } else {
        print_error_rate_table(&rows);
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> DpcmOptions {
        DpcmOptions {
            bits: 4,
            error_rates: vec![0.01, 0.001],
            seed: 42,
            trials: 1,
        }
    }

    fn tone() -> SignalSource {
        SignalSource::Sine {
            frequency: 1000.0,
            duration_seconds: 0.25,
            sample_rate: 8000,
            amplitude: 1.0,
        }
    }

    #[test]
    fn test_writes_corrupted_files() {
        let dir = tempfile::tempdir().unwrap();
        run(&tone(), &options(), Some(dir.path()), true).unwrap();
        assert!(dir.path().join("dpcm_4bits_p0.01.wav").exists());
        assert!(dir.path().join("dpcm_4bits_p0.001.wav").exists());
    }

    #[test]
    fn test_rejects_bad_rate() {
        let opts = DpcmOptions {
            error_rates: vec![2.0],
            ..options()
        };
        let err = run(&tone(), &opts, None, true).unwrap_err();
        assert!(err.to_string().contains("error rate"));
    }

    #[test]
    fn test_rejects_zero_trials() {
        let opts = DpcmOptions {
            trials: 0,
            ..options()
        };
        assert!(run(&tone(), &opts, None, true).is_err());
    }
}
