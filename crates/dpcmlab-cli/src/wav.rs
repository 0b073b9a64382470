//! WAV loading and saving.
//!
//! Input may be integer PCM of any bit depth hound supports, or 32-bit float.
//! Integer samples are scaled by `2^(bits - 1)` into [-1, 1). Only the first
//! channel of a multichannel file is kept. Output is always mono 16-bit PCM.

use std::path::Path;

use anyhow::{Context, Result};
use dpcmlab_core::Signal;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing::debug;

/// Reads a WAV file into a mono [`Signal`].
pub fn read_wav(path: &Path) -> Result<Signal> {
    let mut reader = WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file '{}'", path.display()))?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels.max(1));

    let interleaved: Vec<f64> = match spec.sample_format {
        SampleFormat::Int => {
            let scale = (1u64 << (spec.bits_per_sample.max(1) - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / scale))
                .collect::<Result<Vec<f64>, _>>()
        }
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<Vec<f64>, _>>(),
    }
    .with_context(|| format!("Failed to read samples from '{}'", path.display()))?;

    let samples: Vec<f64> = interleaved.into_iter().step_by(channels).collect();
    debug!(
        path = %path.display(),
        channels,
        bits = spec.bits_per_sample,
        sample_rate = spec.sample_rate,
        samples = samples.len(),
        "loaded wav"
    );

    Ok(Signal::new(samples, spec.sample_rate)?)
}

/// Converts a sample to 16-bit PCM, clipping to [-1, 1] first.
pub fn to_pcm16(sample: f64) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16
}

/// Writes mono samples as a 16-bit PCM WAV file.
pub fn write_wav(path: &Path, samples: &[f64], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV file '{}'", path.display()))?;
    for &sample in samples {
        writer.write_sample(to_pcm16(sample))?;
    }
    writer
        .finalize()
        .with_context(|| format!("Failed to finalize WAV file '{}'", path.display()))?;

    debug!(path = %path.display(), samples = samples.len(), "wrote wav");
    Ok(())
}
