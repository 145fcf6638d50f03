//! NICK command handler.
//!
//! Gives the connection its nick or changes the existing one. The first
//! accepted nick registers the connection; later changes are relayed to the
//! caller and to every peer sharing a channel with it.

use super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::state::SetNick;
use async_trait::async_trait;
use minirc_proto::{Command, Message, MessageRef, NickExt, Prefix, Response};
use tracing::info;

pub struct NickHandler;

#[async_trait]
impl Handler for NickHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        // NICK <nickname>
        let nick = msg.arg(0).ok_or(HandlerError::NoNicknameGiven)?;
        if nick.is_empty() {
            return Err(HandlerError::NoNicknameGiven);
        }
        if !nick.is_valid_nick() {
            return Err(HandlerError::ErroneousNickname(nick.to_string()));
        }

        let outcome = ctx
            .registry
            .set_nick(ctx.id, nick)
            .map_err(|_| HandlerError::NicknameInUse(nick.to_string()))?;

        match outcome {
            SetNick::Unchanged => Ok(()),
            SetNick::Registered => {
                info!(conn = %ctx.id, nick = %nick, "Client registered");
                ctx.reply(Response::rpl_welcome(nick));
                ctx.reply(Response::err_nomotd(nick));
                Ok(())
            }
            SetNick::Renamed { old } => {
                info!(conn = %ctx.id, old = %old, new = %nick, "Nick changed");
                let relay = Message::from(Command::NICK(nick.to_string()))
                    .with_prefix(Prefix::Nick(old));
                ctx.registry.send(ctx.id, relay.clone());
                // Audience as of the instant the change committed, one copy
                // per peer regardless of how many channels are shared.
                let peers = ctx.registry.audience(ctx.id);
                ctx.registry.send_to_all(&peers, &relay);
                Ok(())
            }
        }
    }
}
