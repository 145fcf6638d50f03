//! PRIVMSG command handler.
//!
//! Relays text to a single nick or to every member of a channel except the
//! sender. The sender never sees an echo of its own channel message.

use super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use async_trait::async_trait;
use minirc_proto::{ChannelExt, Command, Message, MessageRef, NickExt, Prefix};

pub struct PrivmsgHandler;

#[async_trait]
impl Handler for PrivmsgHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        // PRIVMSG <target> <text>
        let target = msg.arg(0).ok_or(HandlerError::NoRecipient)?;
        let text = msg.arg(1).ok_or(HandlerError::NoTextToSend)?;
        let Some(nick) = ctx.nick() else {
            return Ok(());
        };

        let relay = Message::from(Command::PRIVMSG(target.to_string(), text.to_string()))
            .with_prefix(Prefix::Nick(nick));

        if target.starts_with('#') {
            if !target.is_channel_name() {
                return Err(HandlerError::NoSuchChannel(target.to_string()));
            }
            let Some(members) = ctx.registry.members(target) else {
                return Err(HandlerError::NoSuchChannel(target.to_string()));
            };
            if !ctx.registry.is_member(ctx.id, target) {
                return Err(HandlerError::CannotSendToChan(target.to_string()));
            }
            let recipients: Vec<_> = members.into_iter().filter(|&m| m != ctx.id).collect();
            ctx.registry.send_to_all(&recipients, &relay);
        } else {
            if !target.is_valid_nick() {
                return Err(HandlerError::NoSuchNick(target.to_string()));
            }
            let Some(peer) = ctx.registry.resolve_nick(target) else {
                return Err(HandlerError::NoSuchNick(target.to_string()));
            };
            ctx.registry.send(peer, relay);
        }

        Ok(())
    }
}
