//! Outbound message construction and serialization.

use std::fmt::{self, Display, Formatter};

use crate::response::Response;

/// Message source, rendered as `:<source> ` on the wire.
///
/// Numerics and PONG carry the server name; relayed commands carry the nick
/// of the client the event originated from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prefix {
    /// The server itself.
    ServerName(String),
    /// A client, identified by nick.
    Nick(String),
}

impl Display for Prefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::ServerName(name) => write!(f, "{}", name),
            Prefix::Nick(nick) => write!(f, "{}", nick),
        }
    }
}

/// An outbound command with its parameters.
///
/// Each variant renders with its fixed wire shape; parameters that may be
/// empty or contain spaces are rendered as the trailing parameter.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// `NICK <newnick>`
    NICK(String),
    /// `JOIN :<channel>`
    JOIN(String),
    /// `PART <channel>`
    PART(String),
    /// `PRIVMSG <target> :<text>`
    PRIVMSG(String, String),
    /// `QUIT :<reason>`
    QUIT(String),
    /// `PONG <server> :<payload>`
    PONG(String, String),
    /// `<NNN> <target> <params…>` with the final parameter trailing
    Response(Response, Vec<String>),
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Command::NICK(nick) => write!(f, "NICK {}", nick),
            Command::JOIN(channel) => write!(f, "JOIN :{}", channel),
            Command::PART(channel) => write!(f, "PART {}", channel),
            Command::PRIVMSG(target, text) => write!(f, "PRIVMSG {} :{}", target, text),
            Command::QUIT(reason) => write!(f, "QUIT :{}", reason),
            Command::PONG(server, payload) => write!(f, "PONG {} :{}", server, payload),
            Command::Response(response, params) => {
                write!(f, "{:03}", response.code())?;
                if let Some((last, head)) = params.split_last() {
                    for param in head {
                        write!(f, " {}", param)?;
                    }
                    write!(f, " :{}", last)?;
                }
                Ok(())
            }
        }
    }
}

/// An owned outbound IRC message: optional source plus command.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    /// Message source, if any.
    pub prefix: Option<Prefix>,
    /// The command and its parameters.
    pub command: Command,
}

impl Message {
    /// Attach a source to this message.
    pub fn with_prefix(mut self, prefix: Prefix) -> Message {
        self.prefix = Some(prefix);
        self
    }
}

impl From<Command> for Message {
    fn from(command: Command) -> Message {
        Message {
            prefix: None,
            command,
        }
    }
}

impl Display for Message {
    /// Renders the line without its CRLF terminator; the codec appends it
    /// and enforces the outbound size cap.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(ref prefix) = self.prefix {
            write!(f, ":{} ", prefix)?;
        }
        write!(f, "{}", self.command)
    }
}
