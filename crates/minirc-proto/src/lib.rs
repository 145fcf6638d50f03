//! Wire-protocol support for minircd.
//!
//! This crate owns everything that touches the octet level of the protocol:
//! CRLF line framing, inbound message parsing, outbound message construction
//! and serialization with the 512-octet line cap, numeric reply codes, and
//! the name grammars with their case-folding rules.
//!
//! The server crate never formats or splits raw lines itself; it goes
//! through [`Message`], [`MessageRef`] and [`LineCodec`].

mod casemap;
mod chan;
mod error;
mod line;
mod message;
mod nick;
mod parse;
mod response;

pub use casemap::{irc_eq, irc_to_lower};
pub use chan::ChannelExt;
pub use error::ProtocolError;
pub use line::{LineCodec, MAX_LINE_LEN};
pub use message::{Command, Message, Prefix};
pub use nick::NickExt;
pub use parse::MessageRef;
pub use response::Response;
