//! End-to-end checks of the files the commands write.

use std::path::PathBuf;

use dpcmlab_cli::commands::dpcm::{self, DpcmOptions};
use dpcmlab_cli::commands::{quantize, run};
use dpcmlab_cli::wav::{read_wav, write_wav};
use dpcmlab_core::SignalSource;

fn recording(dir: &std::path::Path) -> PathBuf {
    let path = dir.join("speech.wav");
    let samples: Vec<f64> = (0..8000)
        .map(|i| {
            let t = i as f64 / 8000.0;
            0.6 * (2.0 * std::f64::consts::PI * 220.0 * t).sin()
                + 0.2 * (2.0 * std::f64::consts::PI * 660.0 * t).sin()
        })
        .collect();
    write_wav(&path, &samples, 8000).unwrap();
    path
}

#[test]
fn quantized_two_bit_file_holds_four_levels() {
    let dir = tempfile::tempdir().unwrap();
    let source = SignalSource::Wav {
        path: recording(dir.path()),
        max_seconds: None,
    };
    let out = dir.path().join("out");
    quantize::run(&source, &[2], false, Some(&out), true).unwrap();

    let two_bit = read_wav(&out.join("signal_2bits.wav")).unwrap();
    let levels = [-1.0, -1.0 / 3.0, 1.0 / 3.0, 1.0];
    for sample in &two_bit.samples {
        // 16-bit storage adds at most one LSB of error.
        assert!(
            levels.iter().any(|l| (sample - l).abs() < 1e-4),
            "unexpected level {sample}"
        );
    }
    assert!(!out.join("signal_1bit.wav").exists());
}

#[test]
fn dpcm_files_differ_only_at_corrupted_positions() {
    let dir = tempfile::tempdir().unwrap();
    let source = SignalSource::Wav {
        path: recording(dir.path()),
        max_seconds: None,
    };
    let out = dir.path().join("out");
    let options = DpcmOptions {
        bits: 6,
        error_rates: vec![0.0, 0.01],
        seed: 3,
        trials: 1,
    };
    dpcm::run(&source, &options, Some(&out), true).unwrap();

    let clean = read_wav(&out.join("dpcm_6bits_p0.wav")).unwrap();
    let noisy = read_wav(&out.join("dpcm_6bits_p0.01.wav")).unwrap();
    assert_eq!(clean.len(), noisy.len());

    let changed = clean
        .samples
        .iter()
        .zip(&noisy.samples)
        .filter(|(a, b)| a != b)
        .count();
    assert!(changed <= 80);
}

#[test]
fn experiment_config_runs_on_recording() {
    let dir = tempfile::tempdir().unwrap();
    recording(dir.path());
    let config = dir.path().join("experiment.json");
    std::fs::write(
        &config,
        r#"{
            "seed": 7,
            "signal": {"type": "wav", "path": "speech.wav", "max_seconds": 0.5},
            "resolutions": [8, 4],
            "dpcm_bits": 6,
            "error_rates": [0.05],
            "trials": 3
        }"#,
    )
    .unwrap();

    run::run(&config, true).unwrap();
}
