//! Test server management.
//!
//! Runs minircd in-process on an ephemeral port; each test gets a fully
//! isolated registry.

#![allow(dead_code)]

use minircd::{Config, Server};
use std::net::SocketAddr;
use tokio::task::JoinHandle;

use super::client::TestClient;

/// An in-process test server instance.
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Bind a fresh server on 127.0.0.1 with an OS-assigned port.
    pub async fn spawn() -> anyhow::Result<TestServer> {
        let mut config = Config::default();
        config.listen.address = "127.0.0.1:0".parse()?;

        let server = Server::bind(config).await?;
        let addr = server.local_addr()?;
        let handle = tokio::spawn(async move {
            let _ = server.run().await;
        });

        Ok(TestServer { addr, handle })
    }

    /// Get the server address.
    pub fn address(&self) -> String {
        self.addr.to_string()
    }

    /// Create a new test client connected to this server.
    pub async fn connect(&self, nick: &str) -> anyhow::Result<TestClient> {
        TestClient::connect(&self.address(), nick).await
    }

    /// Connect and complete registration (NICK + welcome burst).
    pub async fn connect_registered(&self, nick: &str) -> anyhow::Result<TestClient> {
        let mut client = self.connect(nick).await?;
        client.register().await?;
        Ok(client)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
