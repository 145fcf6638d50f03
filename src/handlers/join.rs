//! JOIN command handler.
//!
//! Adds the caller to one or more channels. For each channel actually
//! joined, existing members are notified first, then the caller receives
//! its own JOIN echo, then the NAMES listing. That ordering is observable
//! by clients and load-bearing.

use super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use async_trait::async_trait;
use minirc_proto::{ChannelExt, Command, Message, MessageRef, Prefix, Response, MAX_LINE_LEN};
use tracing::info;

pub struct JoinHandler;

#[async_trait]
impl Handler for JoinHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        // JOIN <channel>{,<channel>}
        let list = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let Some(nick) = ctx.nick() else {
            return Ok(());
        };

        for key in list.split(',').filter(|k| !k.is_empty()) {
            if !key.is_channel_name() {
                ctx.reply(Response::err_nosuchchannel(&nick, key));
                continue;
            }

            let outcome = ctx.registry.join(ctx.id, key);
            if !outcome.joined {
                // Already a member: a repeated join produces no traffic.
                continue;
            }
            info!(conn = %ctx.id, nick = %nick, channel = %outcome.channel, "Joined channel");

            let relay = Message::from(Command::JOIN(outcome.channel.clone()))
                .with_prefix(Prefix::Nick(nick.clone()));
            ctx.registry.send_to_all(&outcome.prior, &relay);
            ctx.registry.send(ctx.id, relay);
            send_names(ctx, &nick, &outcome.channel);
        }

        Ok(())
    }
}

/// Send the `353`/`366` NAMES block for a just-joined channel.
///
/// The listing is the one message that is split across multiple lines
/// rather than truncated: member nicks are packed into as many `353`
/// replies as needed to keep each serialized line within the 512-octet
/// cap. At least one `353` goes out even when the joiner is alone.
fn send_names(ctx: &Context<'_>, nick: &str, channel: &str) {
    let members = ctx.registry.member_nicks(channel);

    // Octets taken by everything but the nick list itself:
    // ":<server> 353 <nick> = <channel> :…\r\n" has 13 fixed octets.
    let budget = MAX_LINE_LEN
        .saturating_sub(ctx.server_name.len() + nick.len() + channel.len() + 13)
        .max(1);

    let mut chunk = String::new();
    for member in &members {
        if !chunk.is_empty() && chunk.len() + 1 + member.len() > budget {
            ctx.reply(Response::rpl_namreply(nick, channel, &chunk));
            chunk.clear();
        }
        if !chunk.is_empty() {
            chunk.push(' ');
        }
        chunk.push_str(member);
    }
    ctx.reply(Response::rpl_namreply(nick, channel, &chunk));
    ctx.reply(Response::rpl_endofnames(nick, channel));
}
