//! minircd - a minimal IRC-compatible chat relay server.
//!
//! The library surface exists so the server can be embedded, most notably
//! by the integration tests, which run a real listener in-process on an
//! ephemeral port.

pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod state;

pub use config::Config;
pub use network::Server;
