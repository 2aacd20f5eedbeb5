//! Logger set-up for the headless runner and tests.
//!
//! Library code logs through the `log` facade only; this module installs
//! `env_logger` as the backend. `RUST_LOG` overrides the default filter.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Default filter for the given verbosity: `debug` shows per-transition
/// controller messages, `info` only level loading and run summaries.
#[must_use]
pub const fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs the global logger.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_level(verbose).to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // Only fails when a logger is already installed.
    if builder.try_init().is_err() {
        log::trace!("logger already installed");
    }
}
