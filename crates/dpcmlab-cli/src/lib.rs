//! dpcmlab CLI library.
//!
//! Command implementations plus the pieces the core leaves to its callers:
//! WAV loading and saving, signal selection, and logging setup.

pub mod commands;
pub mod input;
pub mod logging;
pub mod wav;
