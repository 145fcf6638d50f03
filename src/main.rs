//! minircd - a minimal IRC-compatible chat relay server.
//!
//! Clients register a nick, join channels and exchange messages; the server
//! keeps everything in memory and persists nothing.

use minircd::config::Config;
use minircd::network::Server;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    info!(server = %config.server.name, "Starting minircd");

    let server = Server::bind(config).await?;
    server.run().await?;

    Ok(())
}
