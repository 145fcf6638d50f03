//! Unified error handling for minircd.
//!
//! Command handlers fail with [`HandlerError`]; every user-visible failure
//! maps to a numeric reply and nothing propagates past the dispatch loop.

use minirc_proto::{Message, Prefix, Response};
use thiserror::Error;

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("no nickname given")]
    NoNicknameGiven,

    #[error("erroneous nickname: {0}")]
    ErroneousNickname(String),

    #[error("nickname in use: {0}")]
    NicknameInUse(String),

    #[error("not registered")]
    NotRegistered,

    #[error("not enough parameters")]
    NeedMoreParams,

    #[error("no recipient")]
    NoRecipient,

    #[error("no text to send")]
    NoTextToSend,

    #[error("no such nick: {0}")]
    NoSuchNick(String),

    #[error("no such channel: {0}")]
    NoSuchChannel(String),

    #[error("cannot send to channel: {0}")]
    CannotSendToChan(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Client is quitting; the connection loop runs the disconnect path.
    #[error("client quit: {0:?}")]
    Quit(Option<String>),
}

impl HandlerError {
    /// Convert to a numeric reply addressed to the issuing client.
    ///
    /// `nick` is the client's current nick or `*`; `cmd_name` is the
    /// dispatched command token, used by the replies that echo it.
    /// Returns `None` for errors that don't warrant a client-visible reply.
    pub fn to_irc_reply(&self, server_name: &str, nick: &str, cmd_name: &str) -> Option<Message> {
        let msg = match self {
            Self::NoNicknameGiven => Response::err_nonicknamegiven(nick),
            Self::ErroneousNickname(bad) => Response::err_erroneusnickname(nick, bad),
            Self::NicknameInUse(bad) => Response::err_nicknameinuse(nick, bad),
            Self::NotRegistered => Response::err_notregistered(nick),
            Self::NeedMoreParams => Response::err_needmoreparams(nick, cmd_name),
            Self::NoRecipient => Response::err_norecipient(nick, cmd_name),
            Self::NoTextToSend => Response::err_notexttosend(nick),
            Self::NoSuchNick(target) => Response::err_nosuchnick(nick, target),
            Self::NoSuchChannel(chan) => Response::err_nosuchchannel(nick, chan),
            Self::CannotSendToChan(chan) => Response::err_cannotsendtochan(nick, chan),
            Self::UnknownCommand(cmd) => Response::err_unknowncommand(nick, cmd),

            Self::Quit(_) => return None,
        };

        Some(msg.with_prefix(Prefix::ServerName(server_name.to_string())))
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_carries_server_prefix_and_target() {
        let reply = HandlerError::NotRegistered
            .to_irc_reply("server", "*", "JOIN")
            .unwrap();
        assert_eq!(reply.to_string(), ":server 451 * :You have not registered");
    }

    #[test]
    fn test_needmoreparams_echoes_command() {
        let reply = HandlerError::NeedMoreParams
            .to_irc_reply("server", "alice", "PART")
            .unwrap();
        assert_eq!(
            reply.to_string(),
            ":server 461 alice PART :Not enough parameters"
        );
    }

    #[test]
    fn test_quit_has_no_reply() {
        assert!(HandlerError::Quit(None)
            .to_irc_reply("server", "alice", "QUIT")
            .is_none());
    }
}
