//! Quantize command implementation
//!
//! Quantizes a signal at several resolutions and reports the distortion of
//! each, optionally saving every rendition as a WAV file.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use dpcmlab_core::pipeline::{resolution_sweep, ResolutionReport};
use dpcmlab_core::quantizer::{quantize, quantize_1bit};
use dpcmlab_core::SignalSource;
use serde::Serialize;

use super::reporting::{print_json, print_resolution_table, print_signal_header, print_written};
use super::{ensure_out_dir, parse_depths};
use crate::input::load_signal;
use crate::wav::write_wav;

/// JSON output of the quantize command.
#[derive(Debug, Serialize)]
pub struct QuantizeOutput {
    /// Input sample rate in Hz.
    pub sample_rate: u32,
    /// Input length in samples.
    pub num_samples: usize,
    /// One row per resolution.
    pub resolutions: Vec<ResolutionReport>,
}

/// Run the quantize command
///
/// # Arguments
/// * `source` - Signal to analyze
/// * `bits` - Resolutions to test
/// * `one_bit` - Also run the 1-bit hard-threshold quantizer
/// * `out_dir` - Where to write the quantized WAV files, if anywhere
/// * `json_output` - Print JSON instead of a table
///
/// # Returns
/// Exit code: 0 on success
pub fn run(
    source: &SignalSource,
    bits: &[u32],
    one_bit: bool,
    out_dir: Option<&Path>,
    json_output: bool,
) -> Result<ExitCode> {
    let depths = parse_depths(bits)?;
    let signal = load_signal(source, None)?;
    let rows = resolution_sweep(&signal.samples, &depths, one_bit)?;

    if !json_output {
        print_signal_header("Uniform quantization", &signal);
    }

    if let Some(dir) = out_dir {
        ensure_out_dir(dir)?;
        let mut outputs = vec![(dir.join("signal_original.wav"), signal.samples.clone())];
        for &depth in &depths {
            outputs.push((
                dir.join(format!("signal_{}bits.wav", depth.bits())),
                quantize(&signal.samples, depth),
            ));
        }
        if one_bit {
            outputs.push((dir.join("signal_1bit.wav"), quantize_1bit(&signal.samples)));
        }

        for (path, samples) in outputs {
            write_wav(&path, &samples, signal.sample_rate)?;
            if !json_output {
                print_written(&path);
            }
        }
    }

    if json_output {
        print_json(&QuantizeOutput {
            sample_rate: signal.sample_rate,
            num_samples: signal.len(),
            resolutions: rows,
        })?;
    } else {
        print_resolution_table(&rows);
    }

    Ok(ExitCode::SUCCESS)
}
