//! Blue/green traffic gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌───────────────────────────────────────────────┐
//!                         │                  GATEWAY                       │
//!   GET /?choice=spaces   │  ┌─────────┐    ┌──────────┐    ┌───────────┐ │
//!   ──────────────────────┼─▶│  http   │───▶│ Selector │───▶│Dispatcher │─┼──▶ blue / green
//!                         │  │ server  │    │ (t blue, │    │ GET +     │ │
//!   JSON body + status    │  │         │◀───│  t green)│◀───│ deadline  │◀┼──
//!   ◀─────────────────────┼──│         │    └──────────┘    └───────────┘ │
//!                         │  └─────────┘                                   │
//!                         │  config · observability · lifecycle            │
//!                         └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use traffic_gateway::config::load_config;
use traffic_gateway::lifecycle::startup;
use traffic_gateway::observability::init_logging;

#[derive(Parser)]
#[command(name = "traffic-gateway")]
#[command(about = "Splits traffic between blue and green backends", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability)?;
    tracing::info!("traffic-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
