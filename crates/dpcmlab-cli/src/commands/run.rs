//! Run command implementation
//!
//! Executes every analysis described by an experiment configuration file.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use dpcmlab_core::{run_experiment, ExperimentConfig};
use tracing::info;

use super::reporting::{
    print_comparison, print_error_rate_table, print_json, print_resolution_table,
    print_signal_header,
};
use crate::input::load_signal;

/// Run the run command
///
/// # Arguments
/// * `config_path` - Path to the experiment JSON file
/// * `json_output` - Print the report as JSON instead of tables
///
/// # Returns
/// Exit code: 0 on success
pub fn run(config_path: &Path, json_output: bool) -> Result<ExitCode> {
    let json = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let config = ExperimentConfig::from_json(&json)
        .with_context(|| format!("Failed to load config file: {}", config_path.display()))?;

    // WAV paths in a config are relative to the config file.
    let base_dir = config_path.parent();
    let signal = load_signal(&config.signal, base_dir)?;
    info!(config = %config_path.display(), "loaded experiment");

    let report = run_experiment(&config, &signal)?;

    if json_output {
        print_json(&report)?;
        return Ok(ExitCode::SUCCESS);
    }

    print_signal_header(
        &format!("Experiment: {}", config_path.display()),
        &signal,
    );
    println!(
        "  {} {}   {} {:.6}",
        "Seed:".dimmed(),
        report.seed,
        "Power:".dimmed(),
        report.signal_power
    );
    print_resolution_table(&report.resolutions);
    print_error_rate_table(&report.error_rates);
    if let Some(comparison) = &report.comparison {
        print_comparison(comparison);
    }

    Ok(ExitCode::SUCCESS)
}
