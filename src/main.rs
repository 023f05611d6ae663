//! TCP relay binary.
//!
//! Startup sequence: parse CLI args, initialize logging, load and validate
//! configuration, optionally start the metrics endpoint, bind the three
//! listeners, then run until Ctrl-C.

use std::path::PathBuf;

use clap::Parser;

use tcp_relay::config::{load_config, RelayConfig};
use tcp_relay::lifecycle::Shutdown;
use tcp_relay::observability::{logging, metrics};
use tcp_relay::relay::RelayServer;

#[derive(Parser)]
#[command(name = "tcp-relay")]
#[command(about = "In-memory TCP buffer relay", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Without it, the default local ports
    /// (13337/13338/13339) are used.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the source listener address.
    #[arg(long)]
    source: Option<String>,

    /// Override the replay listener address.
    #[arg(long)]
    replay: Option<String>,

    /// Override the forward listener address.
    #[arg(long)]
    forward: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::local_default(),
    };
    if let Some(addr) = cli.source {
        config.source.bind_address = addr;
    }
    if let Some(addr) = cli.replay {
        config.replay.bind_address = addr;
    }
    if let Some(addr) = cli.forward {
        config.forward.bind_address = addr;
    }

    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        source_addr = %config.source.bind_address,
        replay_addr = %config.replay.bind_address,
        forward_addr = %config.forward.bind_address,
        max_buffer_bytes = config.buffer.max_bytes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let server = RelayServer::bind(&config).await?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();
    server.run(shutdown.subscribe()).await;

    tracing::info!("Shutdown complete");
    Ok(())
}
