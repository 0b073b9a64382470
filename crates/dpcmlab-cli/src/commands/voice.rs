//! Voice command implementation
//!
//! Compares PCM, DPCM and corrupted DPCM on a speech recording. A synthetic
//! voice stands in when the recording is missing.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use dpcmlab_core::pipeline::{compare_codecs, CodecComparison};
use dpcmlab_core::rng::{create_rng, derive_stage_seed};
use dpcmlab_core::{BitDepth, ErrorRate};
use serde::Serialize;

use super::ensure_out_dir;
use super::reporting::{print_comparison, print_json, print_signal_header, print_written};
use crate::input::{load_voice, VoiceOrigin};
use crate::wav::write_wav;

/// Options for the voice command.
#[derive(Debug, Clone)]
pub struct VoiceOptions {
    /// Recording to analyze.
    pub input: PathBuf,
    /// Seconds of the recording to keep.
    pub max_seconds: f64,
    /// Resolution shared by both codecs.
    pub bits: u32,
    /// Error rate applied to the DPCM output.
    pub error_rate: f64,
    /// Base seed.
    pub seed: u32,
}

/// JSON output of the voice command.
#[derive(Debug, Serialize)]
pub struct VoiceOutput {
    /// Recording path, or `None` when the synthetic voice was used.
    pub source: Option<PathBuf>,
    /// Seed the run used.
    pub seed: u32,
    /// Analyzed sample rate in Hz.
    pub sample_rate: u32,
    /// Analyzed length in samples.
    pub num_samples: usize,
    /// Codec measurements.
    pub comparison: CodecComparison,
}

/// Run the voice command
///
/// # Arguments
/// * `options` - Recording, resolution, error rate and seed
/// * `out_dir` - Where to write the decoded WAV files, if anywhere
/// * `json_output` - Print JSON instead of a summary
///
/// # Returns
/// Exit code: 0 on success
pub fn run(options: &VoiceOptions, out_dir: Option<&Path>, json_output: bool) -> Result<ExitCode> {
    let depth = BitDepth::new(options.bits)?;
    let rate = ErrorRate::new(options.error_rate)?;
    let (signal, origin) = load_voice(&options.input, options.max_seconds)?;

    let mut rng = create_rng(derive_stage_seed(options.seed, "comparison"));
    let comparison = compare_codecs(&signal.samples, depth, rate, &mut rng)?;

    if !json_output {
        let title = match &origin {
            VoiceOrigin::File(path) => format!("Voice analysis: {}", path.display()),
            VoiceOrigin::Synthetic => "Voice analysis: synthetic voice".to_string(),
        };
        print_signal_header(&title, &signal);
    }

    if let Some(dir) = out_dir {
        ensure_out_dir(dir)?;
        let outputs = [
            (
                dir.join(format!("voice_dpcm_{}bits.wav", depth.bits())),
                &comparison.dpcm_samples,
            ),
            (dir.join("voice_dpcm_errors.wav"), &comparison.dpcm_error_samples),
        ];
        for (path, samples) in outputs {
            write_wav(&path, samples, signal.sample_rate)?;
            if !json_output {
                print_written(&path);
            }
        }
    }

    if json_output {
        let source = match origin {
            VoiceOrigin::File(path) => Some(path),
            VoiceOrigin::Synthetic => None,
        };
        print_json(&VoiceOutput {
            source,
            seed: options.seed,
            sample_rate: signal.sample_rate,
            num_samples: signal.len(),
            comparison,
        })?;
    } else {
        print_comparison(&comparison);
        if comparison.dpcm.snr_db > comparison.pcm.snr_db {
            println!("  {}", "DPCM outperforms PCM at this resolution".green());
        } else {
            println!("  {}", "PCM matches or beats DPCM at this resolution".yellow());
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(input: PathBuf) -> VoiceOptions {
        VoiceOptions {
            input,
            max_seconds: 3.0,
            bits: 8,
            error_rate: 0.01,
            seed: 42,
        }
    }

    #[test]
    fn test_synthetic_fallback_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path().join("missing.wav"));
        run(&opts, Some(dir.path()), true).unwrap();

        assert!(dir.path().join("voice_dpcm_8bits.wav").exists());
        assert!(dir.path().join("voice_dpcm_errors.wav").exists());
    }

    #[test]
    fn test_recording_is_used_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voice.wav");
        let samples: Vec<f64> = (0..4000).map(|i| (i as f64 * 0.05).sin() * 0.5).collect();
        write_wav(&path, &samples, 8000).unwrap();

        let out = dir.path().join("out");
        run(&options(path), Some(&out), true).unwrap();
        let written = crate::wav::read_wav(&out.join("voice_dpcm_errors.wav")).unwrap();
        assert_eq!(written.len(), 4000);
        assert_eq!(written.sample_rate, 8000);
    }

    #[test]
    fn test_rejects_bad_bits() {
        let dir = tempfile::tempdir().unwrap();
        let opts = VoiceOptions {
            bits: 0,
            ..options(dir.path().join("missing.wav"))
        };
        assert!(run(&opts, None, true).is_err());
    }
}
