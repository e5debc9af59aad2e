//! Command implementations for the swimdash CLI

pub mod config;
pub mod records;
#[cfg(feature = "server")]
pub mod serve;
pub mod totals;
pub mod workout;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use swimdash_core::{DashConfig, Dashboard, DistanceUnit};

// Re-export dispatcher functions for flat access from main.rs
pub use config::run_config;
pub use records::run_records;
#[cfg(feature = "server")]
pub use serve::run_serve;
pub use totals::{run_totals, run_years};
pub use workout::{run_strokes, run_summary, run_workouts};

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (default: $SWIMDASH_CONFIG, then ~/.swimdash/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Per-workout summary CSV (overrides data.records)
    #[arg(long, global = true, value_name = "CSV")]
    pub records: Option<PathBuf>,

    /// Per-stroke aggregate CSV (overrides data.aggregates)
    #[arg(long, global = true, value_name = "CSV")]
    pub aggregates: Option<PathBuf>,

    /// Distance unit for displayed figures (overrides display.distance_units)
    #[arg(long, global = true, value_name = "UNIT")]
    pub units: Option<DistanceUnit>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Only log warnings and errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

impl GlobalArgs {
    /// Config file contents with command-line overrides applied.
    pub fn load_config(&self) -> Result<DashConfig> {
        let mut config = DashConfig::load(self.config.as_deref())?;
        if let Some(records) = &self.records {
            config.data.records = records.clone();
        }
        if let Some(aggregates) = &self.aggregates {
            config.data.aggregates = aggregates.clone();
        }
        if let Some(units) = self.units {
            config.display.distance_units = units;
        }
        Ok(config)
    }
}

pub(crate) fn load_dashboard(config: &DashConfig) -> Result<Dashboard> {
    Dashboard::load(&config.data).with_context(|| {
        format!(
            "Failed to load swim data from {} and {}",
            config.data.records.display(),
            config.data.aggregates.display()
        )
    })
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
