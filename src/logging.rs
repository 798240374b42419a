// Tracing subscriber setup.
// The terminal belongs to the UI, so logs go to a file.
//
// Filter priority: REVIEW_CONSOLE_LOG, then RUST_LOG, then --verbose (debug), else info.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::error::Result;

pub const LOG_ENV: &str = "REVIEW_CONSOLE_LOG";

/// Build the env filter from the environment, falling back to the verbosity flag.
pub fn build_env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "debug" } else { "info" };
    std::env::var(LOG_ENV)
        .ok()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(format!("review_console={}", default)))
}

/// Install the global subscriber, appending to `path`.
///
/// Call once, before the terminal switches to raw mode.
pub fn init(path: &Path, verbose: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(build_env_filter(verbose))
        .with(fmt_layer)
        .try_init()
        .map_err(|e| crate::error::ConsoleError::Other(e.to_string()))?;

    Ok(())
}
