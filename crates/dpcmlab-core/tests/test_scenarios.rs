//! Worked examples for each stage of the coding pipeline.

use dpcmlab_core::rng::create_rng;
use dpcmlab_core::{
    dpcm_encode, evaluate, inject_errors, quantize, quantize_1bit, BitDepth, CodecError,
    ErrorRate, Signal,
};
use pretty_assertions::assert_eq;

fn depth(bits: u32) -> BitDepth {
    BitDepth::new(bits).unwrap()
}

#[test]
fn test_one_bit_uniform_quantizer() {
    assert_eq!(quantize(&[-1.0, 0.0, 1.0], depth(1)), vec![-1.0, 1.0, 1.0]);
}

#[test]
fn test_one_bit_threshold_quantizer() {
    assert_eq!(
        quantize_1bit(&[-1.0, -0.001, 0.0, 0.25]),
        vec![-1.0, -1.0, 1.0, 1.0]
    );
}

#[test]
fn test_dpcm_constant_signal() {
    let d = depth(8);
    let out = dpcm_encode(&[0.5, 0.5, 0.5], d).unwrap();
    assert_eq!(out.reconstructed[0], 0.5);
    for &r in &out.reconstructed[1..] {
        assert!((r - 0.5).abs() <= d.quant_step());
    }
    assert_eq!(out.residuals[0], 0.0);
}

#[test]
fn test_error_injection_half_rate() {
    let mut rng = create_rng(2024);
    let result = inject_errors(&[0.2, 0.2, 0.2, 0.2], ErrorRate::new(0.5).unwrap(), &mut rng);

    assert_eq!(result.num_errors, 2);
    let corrupted = result.corrupted.iter().filter(|&&x| x == -0.1).count();
    let intact = result.corrupted.iter().filter(|&&x| x == 0.2).count();
    assert_eq!((corrupted, intact), (2, 2));
}

#[test]
fn test_evaluate_flipped_sample() {
    let d = evaluate(&[1.0, 1.0, 1.0], &[1.0, 1.0, -1.0]).unwrap();
    assert!((d.mse - 4.0 / 3.0).abs() < 1e-12);
    assert!((d.snr_db + 1.25).abs() < 0.01);
}

#[test]
fn test_evaluate_identical() {
    let s = [0.25, -0.5];
    let d = evaluate(&s, &s).unwrap();
    assert_eq!((d.mse, d.snr_db), (0.0, f64::INFINITY));
}

#[test]
fn test_boundary_validation() {
    assert_eq!(BitDepth::new(0), Err(CodecError::InvalidBitDepth { bits: 0 }));
    assert!(matches!(
        ErrorRate::new(1.01),
        Err(CodecError::InvalidErrorRate { .. })
    ));
    assert!(matches!(
        evaluate(&[0.0, 0.0], &[0.0]),
        Err(CodecError::LengthMismatch { .. })
    ));
    assert_eq!(dpcm_encode(&[], depth(4)), Err(CodecError::EmptySignal));
}

#[test]
fn test_dpcm_beats_nothing_on_tone() {
    // 4-bit DPCM of a 1 kHz tone at 8 kHz still tracks the waveform.
    let tone = Signal::sine(1000.0, 2.0, 8000, 1.0).unwrap();
    let out = dpcm_encode(&tone.samples, depth(4)).unwrap();
    let d = evaluate(&tone.samples, &out.reconstructed).unwrap();
    assert!(d.snr_db > 10.0, "snr was {}", d.snr_db);
}

#[test]
fn test_snr_drops_with_error_rate() {
    let tone = Signal::sine(1000.0, 2.0, 8000, 1.0).unwrap();
    let out = dpcm_encode(&tone.samples, depth(4)).unwrap();

    let mut mean_snr = Vec::new();
    for rate in [0.001, 0.01, 0.1] {
        let rate = ErrorRate::new(rate).unwrap();
        let mut total_mse = 0.0;
        for trial in 0..10 {
            let mut rng = create_rng(trial);
            let injection = inject_errors(&out.reconstructed, rate, &mut rng);
            total_mse += evaluate(&tone.samples, &injection.corrupted).unwrap().mse;
        }
        let power = 0.5;
        mean_snr.push(10.0 * (power / (total_mse / 10.0)).log10());
    }

    assert!(mean_snr[0] > mean_snr[1]);
    assert!(mean_snr[1] > mean_snr[2]);
}
