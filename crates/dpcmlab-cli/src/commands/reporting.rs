//! Human-readable report printing shared by the commands.

use colored::Colorize;
use dpcmlab_core::pipeline::{CodecComparison, ErrorRateReport, ResolutionReport};
use dpcmlab_core::{Distortion, Signal};
use serde::Serialize;

/// Formats an SNR for a table cell; infinite values print as `inf`.
pub(crate) fn format_snr(snr_db: f64) -> String {
    if snr_db.is_infinite() {
        if snr_db > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        format!("{:.2}", snr_db)
    }
}

/// Prints a report as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn print_signal_header(title: &str, signal: &Signal) {
    println!("{}", title.cyan().bold());
    println!(
        "  {} {} samples, {} Hz ({:.2} s)",
        "Signal:".dimmed(),
        signal.len(),
        signal.sample_rate,
        signal.duration_seconds()
    );
}

pub(crate) fn print_resolution_table(rows: &[ResolutionReport]) {
    println!("\n{}", "Quantization performance".cyan().bold());
    println!("{:<20} | {:>9} | {:>12} | {:>12}", "Resolution", "SNR (dB)", "MSE", "Mean |err|");
    println!("{}", "-".repeat(62));
    for row in rows {
        println!(
            "{:<20} | {:>9} | {:>12.6} | {:>12.6}",
            row.label,
            format_snr(row.snr_db),
            row.mse,
            row.mean_abs_error
        );
    }
}

pub(crate) fn print_error_rate_table(rows: &[ErrorRateReport]) {
    println!("\n{}", "DPCM with channel errors".cyan().bold());
    println!("{:>10} | {:>6} | {:>8} | {:>12} | {:>9}", "p", "bits", "errors", "MSE", "SNR (dB)");
    println!("{}", "-".repeat(57));
    for row in rows {
        println!(
            "{:>10} | {:>6} | {:>8} | {:>12.6} | {:>9}",
            row.error_rate,
            row.bits,
            row.num_errors,
            row.mean_mse,
            format_snr(row.snr_db)
        );
    }
    if let Some(first) = rows.first() {
        if first.trials > 1 {
            println!("  {}", format!("MSE averaged over {} trials", first.trials).dimmed());
        }
    }
}

pub(crate) fn print_comparison(cmp: &CodecComparison) {
    println!("\n{}", format!("Codec comparison at {} bits", cmp.bits).cyan().bold());
    print_distortion_line("PCM", &cmp.pcm);
    print_distortion_line("DPCM", &cmp.dpcm);
    print_distortion_line(
        &format!("DPCM, p = {}", cmp.error_rate),
        &cmp.dpcm_with_errors,
    );
    println!("  {} {}", "Errors introduced:".dimmed(), cmp.num_errors);
}

fn print_distortion_line(label: &str, d: &Distortion) {
    println!(
        "  {:<18} SNR {:>8} dB   MSE {:.6}",
        label,
        format_snr(d.snr_db),
        d.mse
    );
}

pub(crate) fn print_written(path: &std::path::Path) {
    println!("  {} {}", "wrote".green(), path.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_snr() {
        assert_eq!(format_snr(f64::INFINITY), "inf");
        assert_eq!(format_snr(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_snr(-1.2494), "-1.25");
        assert_eq!(format_snr(49.9), "49.90");
    }
}
