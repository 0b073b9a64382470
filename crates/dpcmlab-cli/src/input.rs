//! Signal selection for the CLI commands.
//!
//! Every command analyzes either a synthetic tone or a WAV recording. The
//! shared [`SignalArgs`] flags describe that choice; [`load_signal`] turns a
//! [`SignalSource`] into samples.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dpcmlab_core::{Signal, SignalSource};
use tracing::warn;

use crate::wav::read_wav;

/// Sample rate of the synthetic voice used when a recording is missing.
pub const FALLBACK_VOICE_RATE: u32 = 16_000;

/// Length of the synthetic voice used when a recording is missing.
pub const FALLBACK_VOICE_SECONDS: f64 = 3.0;

/// Flags selecting the analyzed signal.
#[derive(Debug, Clone, Args)]
pub struct SignalArgs {
    /// WAV file to analyze instead of a synthetic tone
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Keep at most this many seconds of the input file
    #[arg(long, requires = "input")]
    pub max_seconds: Option<f64>,

    /// Tone frequency in Hz
    #[arg(long, default_value_t = 1000.0)]
    pub frequency: f64,

    /// Tone duration in seconds
    #[arg(long, default_value_t = 2.0)]
    pub duration: f64,

    /// Tone sample rate in Hz
    #[arg(long, default_value_t = 8000)]
    pub sample_rate: u32,
}

impl SignalArgs {
    /// The source these flags describe.
    pub fn source(&self) -> SignalSource {
        match &self.input {
            Some(path) => SignalSource::Wav {
                path: path.clone(),
                max_seconds: self.max_seconds,
            },
            None => SignalSource::Sine {
                frequency: self.frequency,
                duration_seconds: self.duration,
                sample_rate: self.sample_rate,
                amplitude: 1.0,
            },
        }
    }
}

/// Loads or generates the samples for `source`.
///
/// Relative WAV paths are resolved against `base_dir` when given.
pub fn load_signal(source: &SignalSource, base_dir: Option<&Path>) -> Result<Signal> {
    match source {
        SignalSource::Wav { path, max_seconds } => {
            let path = resolve(path, base_dir);
            let signal = read_wav(&path)?;
            Ok(match max_seconds {
                Some(max) => signal.truncated(*max),
                None => signal,
            })
        }
        synthetic => Ok(synthetic.synthesize()?),
    }
}

/// Where the analyzed voice signal came from.
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceOrigin {
    /// Read from this file.
    File(PathBuf),
    /// The file was missing; a synthetic voice was generated.
    Synthetic,
}

/// Loads a voice recording, falling back to the synthetic voice when the file
/// does not exist. Other read errors are returned.
pub fn load_voice(path: &Path, max_seconds: f64) -> Result<(Signal, VoiceOrigin)> {
    if path.exists() {
        let signal = read_wav(path)?.truncated(max_seconds);
        return Ok((signal, VoiceOrigin::File(path.to_path_buf())));
    }

    warn!(path = %path.display(), "voice recording not found, using synthetic voice");
    eprintln!(
        "{} Voice file '{}' not found; generating a synthetic test voice.",
        "!".yellow(),
        path.display()
    );
    let signal = Signal::synthetic_voice(FALLBACK_VOICE_RATE, FALLBACK_VOICE_SECONDS)?;
    Ok((signal, VoiceOrigin::Synthetic))
}

fn resolve(path: &Path, base_dir: Option<&Path>) -> PathBuf {
    match base_dir {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}
