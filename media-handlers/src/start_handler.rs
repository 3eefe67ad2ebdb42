use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, Handler, HandlerResponse, Message, Result};
use tracing::{error, info, instrument};

use crate::command::Command;
use crate::flow;
use crate::messages::HELP_TEXT;
use crate::BotUsername;

/// Replies to `/start` with the help text.
#[derive(Clone)]
pub struct StartHandler {
    bot_username: BotUsername,
    bot: Arc<dyn CoreBot>,
}

impl StartHandler {
    pub fn new(bot_username: BotUsername, bot: Arc<dyn CoreBot>) -> Self {
        Self { bot_username, bot }
    }
}

#[async_trait]
impl Handler for StartHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if flow::claim(&self.bot_username, &message.content, Command::Start)
            .await
            .is_none()
        {
            return Ok(HandlerResponse::Continue);
        }

        info!(user_id = message.user.id, "Sending help text");
        if let Err(e) = self.bot.send_message(&message.chat, HELP_TEXT).await {
            error!(error = %e, "Failed to send help text");
        }
        Ok(HandlerResponse::Stop)
    }
}
