//! Test IRC client.
//!
//! A thin line-oriented client that sends raw commands and asserts on the
//! exact lines the server writes back.

#![allow(dead_code)]

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// A test IRC client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
    nick: String,
}

impl TestClient {
    /// Connect to a test server.
    pub async fn connect(address: &str, nick: &str) -> anyhow::Result<TestClient> {
        let stream = TcpStream::connect(address).await?;
        let (read_half, write_half) = stream.into_split();

        Ok(TestClient {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
            nick: nick.to_string(),
        })
    }

    /// Send a raw IRC line, appending CRLF if missing.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with("\r\n") {
            self.writer.write_all(b"\r\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive a single line from the server, trimmed of its terminator.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive a line with a timeout.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("connection closed by server");
        }
        Ok(line.trim_end().to_string())
    }

    /// Receive lines until the given predicate returns true.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<String>>
    where
        F: FnMut(&str) -> bool,
    {
        let mut lines = Vec::new();
        loop {
            let line = self.recv().await?;
            let done = predicate(&line);
            lines.push(line);
            if done {
                break;
            }
        }
        Ok(lines)
    }

    /// Register with the server and assert the exact welcome burst.
    pub async fn register(&mut self) -> anyhow::Result<()> {
        let nick = self.nick.clone();
        self.send_raw(&format!("NICK {}", nick)).await?;
        let line = self.recv().await?;
        anyhow::ensure!(
            line == format!(":server 001 {} :Welcome", nick),
            "expected welcome, got: {line}"
        );
        let line = self.recv().await?;
        anyhow::ensure!(
            line == format!(":server 422 {} :MOTD File is missing", nick),
            "expected MOTD numeric, got: {line}"
        );
        Ok(())
    }

    /// Join a channel and drain its JOIN echo and NAMES block.
    ///
    /// Returns every line received through the `366` terminator.
    pub async fn join(&mut self, channel: &str) -> anyhow::Result<Vec<String>> {
        self.send_raw(&format!("JOIN {}", channel)).await?;
        self.recv_until(|line| line.starts_with(":server 366 "))
            .await
    }

    /// Assert the server has nothing queued for this client.
    ///
    /// Uses a PING round-trip as a sync point: the PONG must be the very
    /// next line, proving nothing else was pending ahead of it.
    pub async fn assert_no_pending(&mut self) -> anyhow::Result<()> {
        self.send_raw("PING sync").await?;
        let line = self.recv().await?;
        anyhow::ensure!(
            line == ":server PONG server :sync",
            "expected quiet stream, got: {line}"
        );
        Ok(())
    }

    /// Half-close the connection: send FIN, keep reading allowed.
    pub async fn shutdown_write(&mut self) -> anyhow::Result<()> {
        self.writer.shutdown().await?;
        Ok(())
    }
}
