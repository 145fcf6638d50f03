//! IRC command handlers.
//!
//! This module contains the [`Handler`] trait, the command dispatch map, and
//! the [`Engine`] that ties parsing, the registration gate, handler execution
//! and error-to-numeric conversion together. Handlers run to completion with
//! exclusive access to the [`Registry`]; fan-out is a series of queue pushes,
//! so no handler ever suspends while the state is mid-mutation.

mod join;
mod nick;
mod part;
mod ping;
mod privmsg;
mod quit;

pub use join::JoinHandler;
pub use nick::NickHandler;
pub use part::PartHandler;
pub use ping::PingHandler;
pub use privmsg::PrivmsgHandler;
pub use quit::QuitHandler;

use crate::error::{HandlerError, HandlerResult};
use crate::state::{ConnId, Registry};
use async_trait::async_trait;
use minirc_proto::{Command, Message, MessageRef, Prefix};
use std::collections::HashMap;
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

/// Handler context passed to each command handler.
///
/// Holds the issuing connection's handle and the locked registry; everything
/// a handler does goes through these two.
pub struct Context<'a> {
    /// The issuing connection.
    pub id: ConnId,
    /// Shared server state, held exclusively for the duration of the handler.
    pub registry: &'a mut Registry,
    /// Server name used as the source of numeric replies.
    pub server_name: &'a str,
}

impl Context<'_> {
    /// The caller's nick in display casing, when registered.
    pub fn nick(&self) -> Option<String> {
        self.registry.display_nick(self.id).map(str::to_string)
    }

    /// Queue a server-prefixed reply to the issuing connection.
    pub fn reply(&self, msg: Message) {
        let msg = msg.with_prefix(Prefix::ServerName(self.server_name.to_string()));
        self.registry.send(self.id, msg);
    }
}

/// A command handler.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult;
}

/// Registration requirements of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerPhase {
    /// Valid in any state (NICK, PING, QUIT).
    Universal,
    /// Requires registration (JOIN, PART, PRIVMSG).
    PostReg,
}

/// Get the handler phase for a command token (already upper-cased).
pub fn command_phase(command: &str) -> HandlerPhase {
    match command {
        "NICK" | "PING" | "QUIT" => HandlerPhase::Universal,
        _ => HandlerPhase::PostReg,
    }
}

/// Command-keyed map of handlers.
pub struct Dispatcher {
    handlers: HashMap<&'static str, Box<dyn Handler>>,
}

impl Dispatcher {
    /// Create a dispatcher with every supported command registered.
    pub fn new() -> Dispatcher {
        let mut handlers: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();
        handlers.insert("NICK", Box::new(NickHandler));
        handlers.insert("PING", Box::new(PingHandler));
        handlers.insert("QUIT", Box::new(QuitHandler));
        handlers.insert("JOIN", Box::new(JoinHandler));
        handlers.insert("PART", Box::new(PartHandler));
        handlers.insert("PRIVMSG", Box::new(PrivmsgHandler));
        Dispatcher { handlers }
    }

    fn get(&self, command: &str) -> Option<&dyn Handler> {
        self.handlers.get(command).map(Box::as_ref)
    }
}

impl Default for Dispatcher {
    fn default() -> Dispatcher {
        Dispatcher::new()
    }
}

/// What the connection loop should do after a dispatched line.
#[derive(Debug, PartialEq, Eq)]
pub enum Disposition {
    /// Keep reading.
    Continue,
    /// Run the disconnect path with this reason.
    Quit(String),
}

/// The protocol engine: registry, dispatch map and server identity.
///
/// One `Engine` is shared by every connection task; the registry mutex is
/// the single serialization domain for all state mutation and fan-out.
pub struct Engine {
    server_name: String,
    registry: Mutex<Registry>,
    dispatcher: Dispatcher,
}

impl Engine {
    pub fn new(server_name: String) -> Engine {
        Engine {
            server_name,
            registry: Mutex::new(Registry::new()),
            dispatcher: Dispatcher::new(),
        }
    }

    /// The name announced as the source of numerics.
    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    /// Register a new connection and hand back its handle.
    pub async fn attach(&self, sender: mpsc::UnboundedSender<Message>) -> ConnId {
        self.registry.lock().await.attach(sender)
    }

    /// Parse and dispatch one inbound line from `id`.
    ///
    /// Handler errors are converted to numeric replies here; only a quit
    /// escapes, as a [`Disposition::Quit`] for the connection loop.
    pub async fn dispatch(&self, id: ConnId, line: &str) -> Disposition {
        let Some(msg) = MessageRef::parse(line) else {
            return Disposition::Continue;
        };
        let command = msg.command.to_ascii_uppercase();

        let mut registry = self.registry.lock().await;
        let registered = registry.is_registered(id);

        let result = match self.dispatcher.get(&command) {
            Some(_) if command_phase(&command) == HandlerPhase::PostReg && !registered => {
                Err(HandlerError::NotRegistered)
            }
            Some(handler) => {
                debug!(conn = %id, command = %command, "Dispatching");
                let mut ctx = Context {
                    id,
                    registry: &mut *registry,
                    server_name: &self.server_name,
                };
                handler.handle(&mut ctx, &msg).await
            }
            None if registered => Err(HandlerError::UnknownCommand(command.clone())),
            None => Ok(()),
        };

        match result {
            Ok(()) => Disposition::Continue,
            Err(HandlerError::Quit(reason)) => {
                Disposition::Quit(reason.unwrap_or_else(|| "Client quit".to_string()))
            }
            Err(e) => {
                debug!(conn = %id, command = %command, error = %e, "Handler error");
                let nick = registry.display_nick(id).unwrap_or("*").to_string();
                if let Some(reply) = e.to_irc_reply(&self.server_name, &nick, &command) {
                    registry.send(id, reply);
                }
                Disposition::Continue
            }
        }
    }

    /// Run the disconnect path for `id`.
    ///
    /// Detaches the connection from every index and, if it had a nick,
    /// fans `:<nick> QUIT :<reason>` out to each former co-member exactly
    /// once. Idempotent; a second call finds nothing to do.
    pub async fn disconnect(&self, id: ConnId, reason: &str) {
        let mut registry = self.registry.lock().await;
        let nick = registry.display_nick(id).map(str::to_string);
        let peers = registry.detach(id);

        if let Some(nick) = nick {
            debug!(conn = %id, nick = %nick, reason = %reason, "Client disconnected");
            let relay = Message::from(Command::QUIT(reason.to_string()))
                .with_prefix(Prefix::Nick(nick));
            registry.send_to_all(&peers, &relay);
        } else {
            debug!(conn = %id, "Unregistered client disconnected");
        }
    }
}
