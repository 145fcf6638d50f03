//! Per-connection driver.
//!
//! Each client connection runs in its own task: a `Framed` transport turns
//! the byte stream into CRLF lines, and a `tokio::select!` loop interleaves
//! inbound dispatch with draining the connection's outbound queue. Whatever
//! ends the loop — QUIT, peer close, read or write error — funnels into the
//! single disconnect path on the engine.

use crate::handlers::{Disposition, Engine};
use futures::{SinkExt, StreamExt};
use minirc_proto::LineCodec;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_util::codec::Framed;
use tracing::{debug, info};

/// Drive one client connection to completion.
pub(crate) async fn drive(stream: TcpStream, addr: SocketAddr, engine: Arc<Engine>) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let id = engine.attach(tx).await;
    info!(conn = %id, peer = %addr, "Client connected");

    let mut framed = Framed::new(stream, LineCodec::new());
    let mut quit_reason: Option<String> = None;

    loop {
        tokio::select! {
            inbound = framed.next() => match inbound {
                Some(Ok(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match engine.dispatch(id, &line).await {
                        Disposition::Continue => {}
                        Disposition::Quit(reason) => {
                            quit_reason = Some(reason);
                            break;
                        }
                    }
                }
                Some(Err(e)) => {
                    debug!(conn = %id, error = %e, "Read error");
                    break;
                }
                None => {
                    debug!(conn = %id, "Peer closed connection");
                    break;
                }
            },

            outbound = rx.recv() => match outbound {
                Some(msg) => {
                    if let Err(e) = framed.send(msg).await {
                        debug!(conn = %id, error = %e, "Write error");
                        break;
                    }
                }
                // The registry dropped our sender; nothing more will come.
                None => break,
            },
        }
    }

    let reason = quit_reason.unwrap_or_else(|| "Connection closed".to_string());
    engine.disconnect(id, &reason).await;

    // Flush whatever was queued before the detach, then let the transport
    // drop. Best effort; the peer may already be gone.
    while let Ok(msg) = rx.try_recv() {
        if framed.send(msg).await.is_err() {
            break;
        }
    }
    info!(conn = %id, peer = %addr, "Connection closed");
}
