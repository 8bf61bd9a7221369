//! Catalog search proxy (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────────┐
//!                       │                  CATALOG PROXY                   │
//!                       │                                                  │
//!   GET /api/{resource} │  ┌──────────┐   ┌─────────┐   ┌───────────────┐  │
//!   ────────────────────┼─▶│  http    │──▶│  cors   │──▶│   handlers    │  │
//!                       │  │ server   │   │ check   │   │  + routing    │  │
//!                       │  └──────────┘   └─────────┘   └──────┬────────┘  │
//!                       │                                      │           │
//!                       │                                      ▼           │
//!   Envelope / error    │  ┌──────────┐   ┌─────────┐   ┌───────────────┐  │
//!   ◀───────────────────┼──│ assemble │◀──│  sort   │◀──│  normalize    │◀─┼── Upstream
//!                       │  └──────────┘   └─────────┘   │  ◀ client     │  │   catalog
//!                       │                               └───────────────┘  │
//!                       │  config · observability · lifecycle              │
//!                       └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use swapi_proxy::config::load_config;
use swapi_proxy::lifecycle::startup;
use swapi_proxy::observability::init_logging;

#[derive(Parser, Debug)]
#[command(name = "swapi-proxy")]
#[command(about = "Search proxy for the Star Wars catalog API")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_logging("info");
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    init_logging(&config.observability.log_level);
    tracing::info!("swapi-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    startup::start(config).await
}
