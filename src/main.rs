//! Inference gateway server.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──POST /v1/chat/completions──▶ request_id middleware
//!                                             │
//!                                             ▼
//!                                      parse + validate
//!                                             │
//!                        ┌────────────────────┴───────────────────┐
//!                        ▼                                        ▼
//!                 Echo responder                         Backend forwarder ──▶ Backend
//!              (BACKEND_URL unset)                     (pooled reqwest client)
//!                        └────────────────────┬───────────────────┘
//!                                             ▼
//!   Client ◀──────────────────────────── assemble response
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use inference_gateway::config;
use inference_gateway::lifecycle::{ShutdownHandle, wait_for_signal};
use inference_gateway::observability::{logging, metrics};
use inference_gateway::GatewayServer;

#[derive(Parser)]
#[command(name = "inference-gateway")]
#[command(about = "OpenAI-compatible chat completion gateway", long_about = None)]
struct Args {
    /// Optional TOML config file; PORT and BACKEND_URL override it.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = config::load(args.config.as_deref())?;

    logging::init(&config.observability.log_level);

    tracing::info!("inference-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        backend_url = config.backend.url.as_deref().unwrap_or("(echo mode)"),
        timeout_secs = config.backend.timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validation guarantees this parses
        if let Ok(addr) = config.observability.metrics_address.parse() {
            if let Err(e) = metrics::init_metrics(addr) {
                tracing::error!(error = %e, "Failed to start metrics endpoint");
            }
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = ShutdownHandle::new();
    let server = GatewayServer::new(config)?;
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
