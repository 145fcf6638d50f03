//! PING handler.

use super::{Context, Handler};
use crate::error::HandlerResult;
use async_trait::async_trait;
use minirc_proto::{Command, Message, MessageRef, Prefix};

pub struct PingHandler;

#[async_trait]
impl Handler for PingHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        // PING [<payload>]
        // Response: :<server> PONG <server> :<payload>
        let payload = msg.arg(0).unwrap_or("");
        let pong = Message::from(Command::PONG(
            ctx.server_name.to_string(),
            payload.to_string(),
        ))
        .with_prefix(Prefix::ServerName(ctx.server_name.to_string()));
        ctx.registry.send(ctx.id, pong);
        Ok(())
    }
}
