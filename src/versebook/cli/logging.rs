//! Diagnostic logging for the binary, routed through `tracing`.
//!
//! Library code only emits events; this module installs the subscriber.
//! `RUST_LOG` always wins. Otherwise versebook logs at `warn`, or `debug`
//! with `--verbose`, and dependencies stay at `warn`.

use std::io;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub with_ansi: bool,
}

impl LogConfig {
    pub fn from_verbose(verbose: bool) -> Self {
        Self {
            level: if verbose { Level::DEBUG } else { Level::WARN },
            with_ansi: console::colors_enabled_stderr(),
        }
    }
}

/// Installs the global subscriber. Call once, before any command runs.
pub fn init_logging(config: &LogConfig) {
    let layer = fmt::layer()
        .compact()
        .with_writer(io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(false)
        .without_time();

    // A second init (tests driving `run` twice) is harmless.
    let _ = tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init();
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,versebook={level}",
            level = level.as_str().to_lowercase()
        ))
    })
}
