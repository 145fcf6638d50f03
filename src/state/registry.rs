//! The authoritative in-memory indices.
//!
//! Three indices live here: connections by handle, case-folded nick to
//! connection, and case-folded channel key to member set. Every mutator
//! re-establishes the coupling invariants before returning:
//!
//! - a registered connection appears in the nick index under its folded
//!   nick, and nowhere else;
//! - channel membership and per-connection room sets mirror each other;
//! - a channel with no members does not exist.
//!
//! Mutators are synchronous and never suspend, so a caller holding the
//! registry lock observes every invariant at each call boundary.

use minirc_proto::{irc_to_lower, Message};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

use super::conn::{ConnId, Connection};

/// Registry operation failures, surfaced to handlers as numeric replies.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("nickname is already in use")]
    NickInUse,

    #[error("not on that channel")]
    NotOnChannel,
}

/// Outcome of a successful [`Registry::set_nick`].
#[derive(Debug, PartialEq, Eq)]
pub enum SetNick {
    /// First nick accepted; the connection is now registered.
    Registered,
    /// Nick replaced; `old` is the previous display casing.
    Renamed { old: String },
    /// The caller already holds a case-equal nick; nothing changed.
    Unchanged,
}

/// Outcome of a [`Registry::join`].
#[derive(Debug)]
pub struct JoinOutcome {
    /// False when the caller was already a member (no-op join).
    pub joined: bool,
    /// Channel display name (casing fixed when the channel was created).
    pub channel: String,
    /// Members present before the caller was added.
    pub prior: Vec<ConnId>,
}

struct Channel {
    /// Display casing, as supplied by the creating join.
    name: String,
    members: HashSet<ConnId>,
}

/// The shared server state: all connections, nicks and channels.
#[derive(Default)]
pub struct Registry {
    next_conn_id: u64,
    conns: HashMap<ConnId, Connection>,
    nicks: HashMap<String, ConnId>,
    channels: HashMap<String, Channel>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Register a new connection with no nick and no rooms.
    pub fn attach(&mut self, sender: mpsc::UnboundedSender<Message>) -> ConnId {
        let id = ConnId(self.next_conn_id);
        self.next_conn_id += 1;
        self.conns.insert(id, Connection::new(sender));
        id
    }

    /// Whether the connection has accepted a nick.
    pub fn is_registered(&self, id: ConnId) -> bool {
        self.conns.get(&id).is_some_and(|c| c.nick.is_some())
    }

    /// The connection's nick in display casing.
    pub fn display_nick(&self, id: ConnId) -> Option<&str> {
        self.conns.get(&id).and_then(|c| c.nick.as_deref())
    }

    /// Resolve a nick (case-insensitively) to its connection.
    pub fn resolve_nick(&self, nick: &str) -> Option<ConnId> {
        self.nicks.get(&irc_to_lower(nick)).copied()
    }

    /// Install or change the connection's nick.
    ///
    /// Fails with [`RegistryError::NickInUse`] when the folded nick belongs
    /// to a different connection. A case-equal re-assignment by the holder
    /// is reported as [`SetNick::Unchanged`] and alters nothing, display
    /// casing included.
    pub fn set_nick(&mut self, id: ConnId, nick: &str) -> Result<SetNick, RegistryError> {
        let folded = irc_to_lower(nick);

        match self.nicks.get(&folded) {
            Some(&owner) if owner != id => return Err(RegistryError::NickInUse),
            Some(_) => return Ok(SetNick::Unchanged),
            None => {}
        }

        let Some(conn) = self.conns.get_mut(&id) else {
            return Ok(SetNick::Unchanged);
        };

        let outcome = match conn.nick.take() {
            None => SetNick::Registered,
            Some(old) => {
                self.nicks.remove(&irc_to_lower(&old));
                SetNick::Renamed { old }
            }
        };
        conn.nick = Some(nick.to_string());
        self.nicks.insert(folded, id);

        Ok(outcome)
    }

    /// Add the connection to a channel, creating it on first join.
    ///
    /// Idempotent: joining a channel the caller is already in reports
    /// `joined: false` and changes nothing.
    pub fn join(&mut self, id: ConnId, key: &str) -> JoinOutcome {
        let folded = irc_to_lower(key);

        let already = self
            .conns
            .get(&id)
            .is_some_and(|c| c.rooms.contains(&folded));
        if already || !self.conns.contains_key(&id) {
            let channel = self
                .channels
                .get(&folded)
                .map_or_else(|| key.to_string(), |c| c.name.clone());
            return JoinOutcome {
                joined: false,
                channel,
                prior: Vec::new(),
            };
        }

        let channel = self.channels.entry(folded.clone()).or_insert_with(|| {
            debug!(channel = %key, "Channel created");
            Channel {
                name: key.to_string(),
                members: HashSet::new(),
            }
        });
        let prior: Vec<ConnId> = channel.members.iter().copied().collect();
        channel.members.insert(id);
        let name = channel.name.clone();

        if let Some(conn) = self.conns.get_mut(&id) {
            conn.rooms.insert(folded);
        }

        JoinOutcome {
            joined: true,
            channel: name,
            prior,
        }
    }

    /// Remove the connection from a channel.
    ///
    /// Returns the channel display name and the member snapshot taken
    /// *before* removal (so it includes the caller, the PART fan-out
    /// audience). Deletes the channel when the last member leaves.
    pub fn leave(&mut self, id: ConnId, key: &str) -> Result<(String, Vec<ConnId>), RegistryError> {
        let folded = irc_to_lower(key);

        let member = self
            .conns
            .get(&id)
            .is_some_and(|c| c.rooms.contains(&folded));
        if !member {
            return Err(RegistryError::NotOnChannel);
        }

        let Some(channel) = self.channels.get_mut(&folded) else {
            return Err(RegistryError::NotOnChannel);
        };
        let snapshot: Vec<ConnId> = channel.members.iter().copied().collect();
        channel.members.remove(&id);
        let name = channel.name.clone();
        let now_empty = channel.members.is_empty();

        if now_empty {
            self.channels.remove(&folded);
            debug!(channel = %name, "Channel destroyed");
        }
        if let Some(conn) = self.conns.get_mut(&id) {
            conn.rooms.remove(&folded);
        }

        Ok((name, snapshot))
    }

    /// Members of a channel, or `None` when the channel does not exist.
    pub fn members(&self, key: &str) -> Option<Vec<ConnId>> {
        self.channels
            .get(&irc_to_lower(key))
            .map(|c| c.members.iter().copied().collect())
    }

    /// Whether the connection is a member of the channel.
    pub fn is_member(&self, id: ConnId, key: &str) -> bool {
        self.conns
            .get(&id)
            .is_some_and(|c| c.rooms.contains(&irc_to_lower(key)))
    }

    /// Display nicks of a channel's members, ASCII-ascending.
    pub fn member_nicks(&self, key: &str) -> Vec<String> {
        let mut nicks: Vec<String> = self
            .channels
            .get(&irc_to_lower(key))
            .map(|c| {
                c.members
                    .iter()
                    .filter_map(|m| self.display_nick(*m))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        nicks.sort();
        nicks
    }

    /// All connections sharing at least one channel with `id`, deduplicated
    /// and excluding `id` itself.
    pub fn audience(&self, id: ConnId) -> Vec<ConnId> {
        let mut peers = HashSet::new();
        if let Some(conn) = self.conns.get(&id) {
            for key in &conn.rooms {
                if let Some(channel) = self.channels.get(key) {
                    peers.extend(channel.members.iter().copied().filter(|&m| m != id));
                }
            }
        }
        peers.into_iter().collect()
    }

    /// Remove the connection from every index.
    ///
    /// Returns the quit fan-out audience: every other connection that shared
    /// at least one channel, captured before the removal. Idempotent; a
    /// second detach returns an empty audience.
    pub fn detach(&mut self, id: ConnId) -> Vec<ConnId> {
        let peers = self.audience(id);

        let Some(conn) = self.conns.remove(&id) else {
            return Vec::new();
        };
        if let Some(nick) = &conn.nick {
            self.nicks.remove(&irc_to_lower(nick));
        }
        for key in &conn.rooms {
            let now_empty = match self.channels.get_mut(key) {
                Some(channel) => {
                    channel.members.remove(&id);
                    channel.members.is_empty()
                }
                None => false,
            };
            if now_empty {
                self.channels.remove(key);
                debug!(channel = %key, "Channel destroyed");
            }
        }

        peers
    }

    /// Queue a message for one connection. Silent no-op if it is gone.
    pub fn send(&self, id: ConnId, msg: Message) {
        if let Some(conn) = self.conns.get(&id) {
            let _ = conn.sender.send(msg);
        }
    }

    /// Queue a message for each listed connection.
    pub fn send_to_all(&self, ids: &[ConnId], msg: &Message) {
        for &id in ids {
            self.send(id, msg.clone());
        }
    }
}
