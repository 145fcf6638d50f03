//! PART command handler.
//!
//! Removes the caller from one or more channels. The PART relay goes to the
//! member set snapshotted before removal, so the caller receives its own
//! confirmation as part of the same fan-out.

use super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use async_trait::async_trait;
use minirc_proto::{Command, Message, MessageRef, Prefix, Response};
use tracing::info;

pub struct PartHandler;

#[async_trait]
impl Handler for PartHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        // PART <channel>{,<channel>}
        let list = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let Some(nick) = ctx.nick() else {
            return Ok(());
        };

        for key in list.split(',').filter(|k| !k.is_empty()) {
            match ctx.registry.leave(ctx.id, key) {
                Err(_) => {
                    ctx.reply(Response::err_notonchannel(&nick, key));
                }
                Ok((channel, snapshot)) => {
                    info!(conn = %ctx.id, nick = %nick, channel = %channel, "Left channel");
                    let relay = Message::from(Command::PART(channel))
                        .with_prefix(Prefix::Nick(nick.clone()));
                    ctx.registry.send_to_all(&snapshot, &relay);
                }
            }
        }

        Ok(())
    }
}
