//! QUIT handler.

use super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use async_trait::async_trait;
use minirc_proto::MessageRef;

pub struct QuitHandler;

#[async_trait]
impl Handler for QuitHandler {
    async fn handle(&self, _ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let reason = msg.arg(0).map(|s| s.to_string());

        // Signal quit; the connection loop runs the disconnect path.
        Err(HandlerError::Quit(reason))
    }
}
