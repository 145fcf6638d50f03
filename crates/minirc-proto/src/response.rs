//! Numeric reply codes and their canonical reply messages.
//!
//! Numerics are sent with the wire shape `:<server> <NNN> <target> <params…>`
//! where `<target>` is the caller's current nick, or `*` before registration.
//! The constructors here build the command and parameters; the server prefix
//! is attached by the caller.

#![allow(non_camel_case_types)]

use crate::message::{Command, Message};

/// Numeric reply code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Response {
    /// 001 - Welcome
    RPL_WELCOME = 1,
    /// 353 - NAMES listing line
    RPL_NAMREPLY = 353,
    /// 366 - End of NAMES listing
    RPL_ENDOFNAMES = 366,
    /// 401 - No such nick/channel
    ERR_NOSUCHNICK = 401,
    /// 403 - No such channel
    ERR_NOSUCHCHANNEL = 403,
    /// 404 - Cannot send to channel
    ERR_CANNOTSENDTOCHAN = 404,
    /// 411 - No recipient given
    ERR_NORECIPIENT = 411,
    /// 412 - No text to send
    ERR_NOTEXTTOSEND = 412,
    /// 421 - Unknown command
    ERR_UNKNOWNCOMMAND = 421,
    /// 422 - MOTD file is missing
    ERR_NOMOTD = 422,
    /// 431 - No nickname given
    ERR_NONICKNAMEGIVEN = 431,
    /// 432 - Erroneous nickname
    ERR_ERRONEUSNICKNAME = 432,
    /// 433 - Nickname is already in use
    ERR_NICKNAMEINUSE = 433,
    /// 442 - You're not on that channel
    ERR_NOTONCHANNEL = 442,
    /// 451 - You have not registered
    ERR_NOTREGISTERED = 451,
    /// 461 - Not enough parameters
    ERR_NEEDMOREPARAMS = 461,
}

impl Response {
    /// The three-digit numeric code.
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    fn reply(self, params: Vec<String>) -> Message {
        Message {
            prefix: None,
            command: Command::Response(self, params),
        }
    }
}

macro_rules! impl_reply {
    (
        $(#[$meta:meta])*
        $name:ident, $resp:ident, $msg:literal
    ) => {
        $(#[$meta])*
        pub fn $name(client: &str) -> Message {
            Response::$resp.reply(vec![client.to_string(), $msg.to_string()])
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident, $resp:ident, $arg:ident, $msg:literal
    ) => {
        $(#[$meta])*
        pub fn $name(client: &str, $arg: &str) -> Message {
            Response::$resp.reply(vec![
                client.to_string(),
                $arg.to_string(),
                $msg.to_string(),
            ])
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident, $resp:ident, fmt($arg:ident, $fmt:literal)
    ) => {
        $(#[$meta])*
        pub fn $name(client: &str, $arg: &str) -> Message {
            Response::$resp.reply(vec![client.to_string(), format!($fmt, $arg)])
        }
    };
}

impl Response {
    impl_reply!(
        /// `001 :Welcome`
        rpl_welcome, RPL_WELCOME, "Welcome"
    );
    impl_reply!(
        /// `422 :MOTD File is missing`
        err_nomotd, ERR_NOMOTD, "MOTD File is missing"
    );
    impl_reply!(
        /// `431 :No nickname given`
        err_nonicknamegiven, ERR_NONICKNAMEGIVEN, "No nickname given"
    );
    impl_reply!(
        /// `451 :You have not registered`
        err_notregistered, ERR_NOTREGISTERED, "You have not registered"
    );
    impl_reply!(
        /// `412 :No text to send`
        err_notexttosend, ERR_NOTEXTTOSEND, "No text to send"
    );
    impl_reply!(
        /// `432 <nick> :Erroneous nickname`
        err_erroneusnickname, ERR_ERRONEUSNICKNAME, nick, "Erroneous nickname"
    );
    impl_reply!(
        /// `433 <nick> :Nickname is already in use`
        err_nicknameinuse, ERR_NICKNAMEINUSE, nick, "Nickname is already in use"
    );
    impl_reply!(
        /// `401 <target> :No such nick/channel`
        err_nosuchnick, ERR_NOSUCHNICK, target, "No such nick/channel"
    );
    impl_reply!(
        /// `403 <channel> :No such channel`
        err_nosuchchannel, ERR_NOSUCHCHANNEL, channel, "No such channel"
    );
    impl_reply!(
        /// `404 <channel> :Cannot send to channel`
        err_cannotsendtochan, ERR_CANNOTSENDTOCHAN, channel, "Cannot send to channel"
    );
    impl_reply!(
        /// `442 <channel> :You're not on that channel`
        err_notonchannel, ERR_NOTONCHANNEL, channel, "You're not on that channel"
    );
    impl_reply!(
        /// `421 <command> :Unknown command`
        err_unknowncommand, ERR_UNKNOWNCOMMAND, command, "Unknown command"
    );
    impl_reply!(
        /// `461 <command> :Not enough parameters`
        err_needmoreparams, ERR_NEEDMOREPARAMS, command, "Not enough parameters"
    );
    impl_reply!(
        /// `411 :No recipient given (<command>)`
        err_norecipient, ERR_NORECIPIENT, fmt(command, "No recipient given ({})")
    );

    /// `353 <client> = <channel> :<nick1> <nick2> …`
    pub fn rpl_namreply(client: &str, channel: &str, names: &str) -> Message {
        Response::RPL_NAMREPLY.reply(vec![
            client.to_string(),
            "=".to_string(),
            channel.to_string(),
            names.to_string(),
        ])
    }

    /// `366 <client> <channel> :End of /NAMES list.`
    pub fn rpl_endofnames(client: &str, channel: &str) -> Message {
        Response::RPL_ENDOFNAMES.reply(vec![
            client.to_string(),
            channel.to_string(),
            "End of /NAMES list.".to_string(),
        ])
    }
}
