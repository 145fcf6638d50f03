//! Network module.
//!
//! Contains the [`Server`] (TCP listener + accept loop) and the
//! per-connection driver.

mod connection;

use crate::config::Config;
use crate::handlers::Engine;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// The listening server: accepts clients and spawns one driver task each.
pub struct Server {
    listener: TcpListener,
    engine: Arc<Engine>,
}

impl Server {
    /// Bind the listener and set up the shared engine.
    pub async fn bind(config: Config) -> io::Result<Server> {
        let listener = TcpListener::bind(config.listen.address).await?;
        info!(address = %config.listen.address, server = %config.server.name, "Listening");
        Ok(Server {
            listener,
            engine: Arc::new(Engine::new(config.server.name)),
        })
    }

    /// The address actually bound (useful when binding port 0).
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept clients forever.
    pub async fn run(self) -> io::Result<()> {
        loop {
            let (stream, addr) = self.listener.accept().await?;
            let engine = Arc::clone(&self.engine);
            tokio::spawn(async move {
                connection::drive(stream, addr, engine).await;
            });
        }
    }
}
