//! dpcmlab CLI - quantization and DPCM experiments from the command line
//!
//! This binary quantizes and DPCM-encodes tones or recordings, simulates
//! channel errors and reports the resulting distortion.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use dpcmlab_cli::commands;
use dpcmlab_cli::commands::dpcm::DpcmOptions;
use dpcmlab_cli::commands::voice::VoiceOptions;
use dpcmlab_cli::input::SignalArgs;
use dpcmlab_cli::logging;

/// dpcmlab - Quantization and DPCM error analysis
#[derive(Parser)]
#[command(name = "dpcmlab")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quantize a signal at several resolutions and report SNR
    Quantize {
        #[command(flatten)]
        signal: SignalArgs,

        /// Resolutions to test, in bits
        #[arg(short, long, value_delimiter = ',', default_values_t = [8u32, 6, 4, 3, 2])]
        bits: Vec<u32>,

        /// Skip the 1-bit hard-threshold quantizer
        #[arg(long)]
        no_one_bit: bool,

        /// Write the quantized signals as WAV files into this directory
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// DPCM-encode a signal and measure the effect of channel errors
    Dpcm {
        #[command(flatten)]
        signal: SignalArgs,

        /// DPCM resolution in bits
        #[arg(short, long, default_value_t = 4)]
        bits: u32,

        /// Error rates to simulate
        #[arg(short = 'p', long = "error-rate", value_delimiter = ',', default_values_t = [0.01f64, 0.001])]
        error_rates: Vec<f64>,

        /// Seed for error placement
        #[arg(long, default_value_t = 42)]
        seed: u32,

        /// Independent injections averaged per error rate
        #[arg(long, default_value_t = 1)]
        trials: u32,

        /// Write the corrupted reconstructions as WAV files into this directory
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Compare PCM and DPCM on a voice recording
    Voice {
        /// Voice recording (a synthetic voice is used if it is missing)
        #[arg(short, long, default_value = "xtineFs.wav")]
        input: PathBuf,

        /// Keep at most this many seconds of the recording
        #[arg(long, default_value_t = 3.0)]
        max_seconds: f64,

        /// Resolution shared by both codecs
        #[arg(short, long, default_value_t = 8)]
        bits: u32,

        /// Error rate applied to the DPCM output
        #[arg(short = 'p', long, default_value_t = 0.01)]
        error_rate: f64,

        /// Seed for error placement
        #[arg(long, default_value_t = 42)]
        seed: u32,

        /// Write the decoded signals as WAV files into this directory
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Run every analysis described by an experiment config file
    Run {
        /// Path to the experiment config (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Quantize {
            signal,
            bits,
            no_one_bit,
            out_dir,
            json,
        } => commands::quantize::run(
            &signal.source(),
            &bits,
            !no_one_bit,
            out_dir.as_deref(),
            json,
        ),
        Commands::Dpcm {
            signal,
            bits,
            error_rates,
            seed,
            trials,
            out_dir,
            json,
        } => commands::dpcm::run(
            &signal.source(),
            &DpcmOptions {
                bits,
                error_rates,
                seed,
                trials,
            },
            out_dir.as_deref(),
            json,
        ),
        Commands::Voice {
            input,
            max_seconds,
            bits,
            error_rate,
            seed,
            out_dir,
            json,
        } => commands::voice::run(
            &VoiceOptions {
                input,
                max_seconds,
                bits,
                error_rate,
                seed,
            },
            out_dir.as_deref(),
            json,
        ),
        Commands::Run { config, json } => commands::run::run(&config, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_quantize_defaults() {
        let cli = Cli::try_parse_from(["dpcmlab", "quantize"]).unwrap();
        match cli.command {
            Commands::Quantize {
                signal,
                bits,
                no_one_bit,
                out_dir,
                json,
            } => {
                assert_eq!(bits, vec![8, 6, 4, 3, 2]);
                assert!(!no_one_bit);
                assert!(out_dir.is_none());
                assert!(!json);
                assert!(signal.input.is_none());
                assert_eq!(signal.sample_rate, 8000);
            }
            _ => panic!("expected quantize command"),
        }
    }

    #[test]
    fn test_cli_parses_quantize_bit_list() {
        let cli = Cli::try_parse_from([
            "dpcmlab",
            "quantize",
            "--bits",
            "4,2",
            "--input",
            "speech.wav",
            "--max-seconds",
            "1.5",
        ])
        .unwrap();
        match cli.command {
            Commands::Quantize { signal, bits, .. } => {
                assert_eq!(bits, vec![4, 2]);
                assert_eq!(signal.input, Some(PathBuf::from("speech.wav")));
                assert_eq!(signal.max_seconds, Some(1.5));
            }
            _ => panic!("expected quantize command"),
        }
    }

    #[test]
    fn test_cli_max_seconds_requires_input() {
        let result = Cli::try_parse_from(["dpcmlab", "quantize", "--max-seconds", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_dpcm() {
        let cli = Cli::try_parse_from([
            "dpcmlab",
            "dpcm",
            "--bits",
            "6",
            "-p",
            "0.1,0.05",
            "--seed",
            "7",
            "--trials",
            "5",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Dpcm {
                bits,
                error_rates,
                seed,
                trials,
                json,
                ..
            } => {
                assert_eq!(bits, 6);
                assert_eq!(error_rates, vec![0.1, 0.05]);
                assert_eq!(seed, 7);
                assert_eq!(trials, 5);
                assert!(json);
            }
            _ => panic!("expected dpcm command"),
        }
    }

    #[test]
    fn test_cli_parses_voice_defaults() {
        let cli = Cli::try_parse_from(["dpcmlab", "voice"]).unwrap();
        match cli.command {
            Commands::Voice {
                input,
                max_seconds,
                bits,
                error_rate,
                seed,
                ..
            } => {
                assert_eq!(input, PathBuf::from("xtineFs.wav"));
                assert_eq!(max_seconds, 3.0);
                assert_eq!(bits, 8);
                assert_eq!(error_rate, 0.01);
                assert_eq!(seed, 42);
            }
            _ => panic!("expected voice command"),
        }
    }

    #[test]
    fn test_cli_parses_run_with_verbosity() {
        let cli =
            Cli::try_parse_from(["dpcmlab", "run", "--config", "exp.json", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Run { config, json } => {
                assert_eq!(config, PathBuf::from("exp.json"));
                assert!(!json);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_cli_requires_config_for_run() {
        let err = Cli::try_parse_from(["dpcmlab", "run"]).err().unwrap();
        assert!(err.to_string().contains("--config"));
    }
}
