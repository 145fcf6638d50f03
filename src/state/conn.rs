//! Connection handles and per-connection registry state.

use minirc_proto::Message;
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};
use tokio::sync::mpsc;

/// Opaque handle identifying one client connection.
///
/// Handles are allocated from a monotonically increasing counter and never
/// reused for the lifetime of the process, so a handle kept past disconnect
/// can only ever miss, never alias a newer connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnId(pub(crate) u64);

impl Display for ConnId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-connection state owned by the registry.
pub(crate) struct Connection {
    /// Outbound queue feeding this connection's writer.
    pub(crate) sender: mpsc::UnboundedSender<Message>,
    /// Current nick in its registered casing; `None` until registration.
    pub(crate) nick: Option<String>,
    /// Case-folded keys of the channels this connection is in.
    pub(crate) rooms: HashSet<String>,
}

impl Connection {
    pub(crate) fn new(sender: mpsc::UnboundedSender<Message>) -> Connection {
        Connection {
            sender,
            nick: None,
            rooms: HashSet::new(),
        }
    }
}
