//! dpcmlab core
//!
//! Building blocks for experimenting with coarse audio quantization:
//!
//! - a uniform N-bit quantizer and a 1-bit hard-threshold quantizer,
//! - a DPCM coder with a previous-sample predictor,
//! - a synthetic channel that corrupts a fraction of the samples,
//! - MSE / SNR distortion metrics.
//!
//! # Overview
//!
//! Signals are plain `f64` slices with samples nominally in [-1, 1]. The
//! numeric kernels never fail; parameters are validated when the
//! [`BitDepth`] and [`ErrorRate`] newtypes are built, and operations that
//! need non-empty or equal-length input return a [`CodecError`].
//!
//! # Determinism
//!
//! The only randomness is the choice of corrupted positions, and it always
//! comes from a generator the caller passes in. [`rng::create_rng`] builds a
//! seeded PCG32 so runs can be repeated exactly.
//!
//! # Example
//!
//! ```
//! use dpcmlab_core::{dpcm_encode, evaluate, inject_errors, rng, BitDepth, ErrorRate};
//!
//! let signal: Vec<f64> = (0..800).map(|i| (i as f64 * 0.05).sin()).collect();
//! let depth = BitDepth::new(4)?;
//!
//! let encoded = dpcm_encode(&signal, depth)?;
//! let mut rng = rng::create_rng(42);
//! let injection = inject_errors(&encoded.reconstructed, ErrorRate::new(0.01)?, &mut rng);
//! assert_eq!(injection.num_errors, 8);
//!
//! let distortion = evaluate(&signal, &injection.corrupted)?;
//! assert!(distortion.snr_db.is_finite());
//! # Ok::<(), dpcmlab_core::CodecError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`quantizer`] - Uniform and 1-bit quantizers, [`BitDepth`]
//! - [`dpcm`] - DPCM encoder and decoder
//! - [`channel`] - Error injection, [`ErrorRate`]
//! - [`metrics`] - MSE, SNR and mean absolute error
//! - [`signal`] - Sample buffers and synthetic test signals
//! - [`pipeline`] - Resolution tables, error-rate sweeps, codec comparison
//! - [`config`] - JSON experiment configuration
//! - [`rng`] - Seeded generators

pub mod channel;
pub mod config;
pub mod dpcm;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod quantizer;
pub mod rng;
pub mod signal;

// Re-export main types at crate root
pub use channel::{inject_errors, ErrorRate, Injection};
pub use config::{ComparisonConfig, ExperimentConfig, SignalSource};
pub use dpcm::{dpcm_decode, dpcm_encode, DpcmOutput};
pub use error::{CodecError, CodecResult};
pub use metrics::{evaluate, Distortion};
pub use pipeline::{run_experiment, ExperimentReport};
pub use quantizer::{quantize, quantize_1bit, BitDepth};
pub use signal::Signal;
