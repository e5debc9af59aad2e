use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use swimdash_core::DashConfig;

use super::{load_dashboard, GlobalArgs};

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a config file with every setting at its default
    Init(InitArgs),
    /// Print the effective configuration as TOML
    Show,
    /// Check that both data files exist and load
    Validate,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs, global: &GlobalArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args, global),
        ConfigCommands::Show => run_show(global),
        ConfigCommands::Validate => run_validate(global),
        ConfigCommands::Path => run_path(global),
    }
}

fn run_init(args: InitArgs, global: &GlobalArgs) -> Result<()> {
    let (config_path, _) = DashConfig::resolve_path(global.config.as_deref());

    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    DashConfig::default()
        .save(&config_path)
        .context("Failed to write default config")?;

    println!("✅ Config created at {:?}", config_path);
    println!("\nNext steps:");
    println!("  1. Point [data] records/aggregates at your CSV exports");
    println!("  2. Validate: swimdash config validate");
    Ok(())
}

fn run_show(global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;
    print!("{}", config.to_toml()?);
    Ok(())
}

fn run_validate(global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;

    println!("Validating config...\n");
    config.validate_paths()?;
    println!("  ✓ data.records: {}", config.data.records.display());
    println!("  ✓ data.aggregates: {}", config.data.aggregates.display());

    let dashboard = load_dashboard(&config)?;
    println!(
        "  ✓ loaded {} workouts, {} stroke rows",
        dashboard.records().len(),
        dashboard.aggregates().len()
    );

    println!("\n✅ Config is valid");
    Ok(())
}

fn run_path(global: &GlobalArgs) -> Result<()> {
    let (config_path, _) = DashConfig::resolve_path(global.config.as_deref());
    println!("{}", config_path.display());

    if !config_path.exists() {
        eprintln!("\n(Config does not exist yet. Run: swimdash config init)");
    }

    Ok(())
}
