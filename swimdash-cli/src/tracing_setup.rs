//! Tracing setup for the swimdash CLI
//!
//! Usage:
//!   swimdash --debug ...               # Debug logging
//!   swimdash --quiet ...               # Warnings and errors only
//!   RUST_LOG=swimdash_core=debug ...   # Fine-grained log control
//!
//! Precedence: `RUST_LOG`, then `--debug`/`--quiet`, then `log_level` from the
//! config file, then `info`. Logs go to stderr so `--json` output stays clean.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    pub debug: bool,
    pub quiet: bool,
    /// `log_level` from the config file
    pub level: Option<String>,
}

impl TracingConfig {
    fn default_directive(&self) -> &str {
        if self.debug {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            self.level.as_deref().unwrap_or("info")
        }
    }
}

pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.default_directive()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
