//! HTTP server command
//!
//! Loads both tables once and serves the dashboard API until shutdown.

use anyhow::{Context, Result};
use clap::Parser;

use swimdash_server::{run_server, AppState, ServerConfig};

use super::{load_dashboard, GlobalArgs};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides server.port)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, global: &GlobalArgs) -> Result<()> {
    let mut config = global.load_config()?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.server.cors_permissive |= args.cors_permissive;

    let server_config =
        ServerConfig::from_section(&config.server).context("Invalid server configuration")?;
    let dashboard = load_dashboard(&config)?;
    let state = AppState::new(dashboard, config.display.distance_units);

    run_server(state, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
