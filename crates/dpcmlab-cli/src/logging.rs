//! Diagnostic logging setup.
//!
//! Reports go to stdout; tracing output goes to stderr so `--json` output
//! stays machine-readable.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Maps the number of `-v` flags to a log level.
pub fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity flag when set. Calling this
/// twice is harmless; the second install is ignored.
pub fn init(verbose: u8) {
    let default_directive = level_for_verbosity(verbose).to_string().to_lowercase();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
