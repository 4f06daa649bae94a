//! Inspiration Gateway (v1)
//!
//! A thin forwarding gateway built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌──────────────────────────────────────────────┐
//!                          │               INSPIRATION GATEWAY             │
//!                          │                                               │
//!     UI Request           │  ┌─────────┐    ┌─────────┐    ┌──────────┐  │
//!     ─────────────────────┼─▶│  http   │───▶│ routes  │───▶│  proxy   │──┼──▶ Backend
//!                          │  │ server  │    │ (fixed) │    │ forward  │  │    (/feed,
//!     UI Response          │  └─────────┘    └─────────┘    └────┬─────┘  │     /profiles,
//!     ◀────────────────────┼───────────── relay status + body ◀──┘        │     ...)
//!                          │                                               │
//!                          │  ┌───────────────────────────────────────┐   │
//!                          │  │         Cross-Cutting Concerns         │   │
//!                          │  │  config · observability · lifecycle    │   │
//!                          │  └───────────────────────────────────────┘   │
//!                          └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use inspiration_gateway::config::load_config;
use inspiration_gateway::lifecycle::startup;
use inspiration_gateway::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "inspiration-gateway")]
#[command(about = "Forwarding gateway for the inspiration UI", long_about = None)]
struct Args {
    /// Optional TOML config file. BACKEND_URL and friends override it.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    init_logging(&config.observability);

    tracing::info!("inspiration-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.origin,
        max_body_size = config.limits.max_body_size,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
