//! File-backed tracing setup. The editor owns the terminal, so logs never go to stderr.

use std::fs;

use anyhow::{anyhow, Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

pub const LOG_FILE: &str = "syntaxhub.log";

/// Install the global subscriber. Keep the returned guard alive until exit.
pub fn init(cfg: &Config, verbose: bool) -> Result<WorkerGuard> {
    let dir = cfg.log_path();
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter(cfg, verbose))
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))?;

    tracing::debug!(path = %dir.join(LOG_FILE).display(), "logging initialised");
    Ok(guard)
}

/// `SYNTAXHUB_LOG` wins, then `--verbose`, then `LOG_LEVEL`.
fn filter(cfg: &Config, verbose: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env("SYNTAXHUB_LOG") {
        return filter;
    }
    let level = if verbose {
        "debug".to_string()
    } else {
        cfg.get("LOG_LEVEL").unwrap_or_else(|| "info".into())
    };
    EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"))
}
