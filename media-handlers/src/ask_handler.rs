use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, ChatAction, Handler, HandlerResponse, Message, Result};
use generation_provider::GenerationProvider;
use media_pipeline::{deliver, Artifact, PipelineError, RequestMachine, RequestState};
use tracing::{info, instrument};

use crate::command::Command;
use crate::flow;
use crate::BotUsername;

/// `/ask <question>`: one generated answer sent back as text.
#[derive(Clone)]
pub struct AskHandler {
    bot_username: BotUsername,
    provider: Arc<dyn GenerationProvider>,
    bot: Arc<dyn CoreBot>,
}

impl AskHandler {
    pub fn new(
        bot_username: BotUsername,
        provider: Arc<dyn GenerationProvider>,
        bot: Arc<dyn CoreBot>,
    ) -> Self {
        Self {
            bot_username,
            provider,
            bot,
        }
    }

    pub async fn process(&self, message: &Message, question: &str) -> RequestMachine {
        let mut machine = RequestMachine::new(Command::Ask.name());
        if let Err(e) = self.run(&mut machine, message, question).await {
            flow::report_failure(self.bot.as_ref(), &message.chat, &mut machine, Command::Ask, &e)
                .await;
        }
        machine
    }

    async fn run(
        &self,
        machine: &mut RequestMachine,
        message: &Message,
        question: &str,
    ) -> std::result::Result<(), PipelineError> {
        let question = flow::validate(machine, Command::Ask, question)?;
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            prompt_preview = %question.preview(100),
            "Processing question"
        );
        flow::show_action(self.bot.as_ref(), &message.chat, ChatAction::Typing).await;

        machine.advance(RequestState::Generating { frame: 1, total: 1 });
        let answer = self.provider.generate_text(&question).await?;

        machine.advance(RequestState::Delivering);
        deliver(self.bot.as_ref(), &message.chat, Artifact::Text(answer)).await?;

        machine.advance(RequestState::Done);
        Ok(())
    }
}

#[async_trait]
impl Handler for AskHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(question) = flow::claim(&self.bot_username, &message.content, Command::Ask).await
        else {
            return Ok(HandlerResponse::Continue);
        };
        self.process(message, &question).await;
        Ok(HandlerResponse::Stop)
    }
}
