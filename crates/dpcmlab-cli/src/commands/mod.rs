//! CLI command implementations

pub mod dpcm;
pub mod quantize;
pub mod run;
pub mod voice;

mod reporting;

use std::path::Path;

use anyhow::{Context, Result};
use dpcmlab_core::{BitDepth, ErrorRate};

/// Validates raw `--bits` values.
pub(crate) fn parse_depths(bits: &[u32]) -> Result<Vec<BitDepth>> {
    bits.iter()
        .map(|&b| BitDepth::new(b).map_err(anyhow::Error::from))
        .collect()
}

/// Validates raw `--error-rate` values.
pub(crate) fn parse_rates(rates: &[f64]) -> Result<Vec<ErrorRate>> {
    rates
        .iter()
        .map(|&r| ErrorRate::new(r).map_err(anyhow::Error::from))
        .collect()
}

/// Creates the output directory if needed.
pub(crate) fn ensure_out_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory '{}'", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_depths() {
        assert_eq!(parse_depths(&[8, 1]).unwrap().len(), 2);
        let err = parse_depths(&[4, 0]).unwrap_err();
        assert!(err.to_string().contains("invalid bit depth: 0"));
    }

    #[test]
    fn test_parse_rates() {
        assert!(parse_rates(&[0.0, 1.0]).is_ok());
        assert!(parse_rates(&[1.5]).is_err());
    }
}
