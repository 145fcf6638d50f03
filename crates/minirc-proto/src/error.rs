//! Protocol-level errors.

use thiserror::Error;

/// Errors surfaced by the line codec.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
