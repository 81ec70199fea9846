//! Entry point: load configuration, set up logging, build the server and run
//! the configured transport.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use razorpay_mcp_server::core::{Cli, Config, LogTarget, McpServer, TransportService, init_logging};

#[tokio::main]
async fn main() -> Result<()> {
    let mut config = Config::from_env();
    Cli::parse().apply(&mut config);

    if let LogTarget::File(path) = init_logging(&config.logging) {
        info!("Logging to {}", path.display());
    }

    let transport = config.transport.clone();
    let server = McpServer::from_config(config)?;

    TransportService::new(transport).run(server).await?;

    info!("Server shutting down");
    Ok(())
}
