// src/logging.rs

//! `tracing-subscriber` setup for the `taskguard` binary.
//!
//! `--log-level` wins over `TASKGUARD_LOG`, which takes full `EnvFilter`
//! directives (`taskguard::resources=trace,info`). Without either the
//! filter is `info`. Output goes to stderr, where the spinner also draws.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

const LOG_ENV: &str = "TASKGUARD_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber. Fails if one is already set.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = build_filter(cli_level, std::env::var(LOG_ENV).ok());

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing tracing subscriber: {e}"))
}

fn build_filter(cli_level: Option<LogLevel>, env_value: Option<String>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(directive(level));
    }

    match env_value.as_deref().map(EnvFilter::try_new) {
        Some(Ok(filter)) => filter,
        Some(Err(err)) => {
            eprintln!("taskguard: ignoring invalid {LOG_ENV}: {err}");
            EnvFilter::new(DEFAULT_DIRECTIVE)
        }
        None => EnvFilter::new(DEFAULT_DIRECTIVE),
    }
}

fn directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
