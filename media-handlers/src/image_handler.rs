use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, ChatAction, Handler, HandlerResponse, Message, Result};
use generation_provider::{GenerationProvider, Resolution};
use media_pipeline::{deliver, Artifact, PipelineError, RequestMachine, RequestState};
use tracing::{info, instrument};

use crate::command::Command;
use crate::flow;
use crate::BotUsername;

/// `/image <prompt>`: one generated image sent back as a photo.
#[derive(Clone)]
pub struct ImageHandler {
    bot_username: BotUsername,
    provider: Arc<dyn GenerationProvider>,
    bot: Arc<dyn CoreBot>,
    resolution: Resolution,
}

impl ImageHandler {
    pub fn new(
        bot_username: BotUsername,
        provider: Arc<dyn GenerationProvider>,
        bot: Arc<dyn CoreBot>,
        resolution: Resolution,
    ) -> Self {
        Self {
            bot_username,
            provider,
            bot,
            resolution,
        }
    }

    /// Runs one `/image` request to completion, including the error reply, and returns its
    /// final state.
    pub async fn process(&self, message: &Message, prompt: &str) -> RequestMachine {
        let mut machine = RequestMachine::new(Command::Image.name());
        if let Err(e) = self.run(&mut machine, message, prompt).await {
            flow::report_failure(self.bot.as_ref(), &message.chat, &mut machine, Command::Image, &e)
                .await;
        }
        machine
    }

    async fn run(
        &self,
        machine: &mut RequestMachine,
        message: &Message,
        prompt: &str,
    ) -> std::result::Result<(), PipelineError> {
        let prompt = flow::validate(machine, Command::Image, prompt)?;
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            prompt_preview = %prompt.preview(100),
            resolution = %self.resolution,
            "Processing image request"
        );
        flow::show_action(self.bot.as_ref(), &message.chat, ChatAction::UploadPhoto).await;

        machine.advance(RequestState::Generating { frame: 1, total: 1 });
        let bytes = self.provider.generate_image(&prompt, self.resolution).await?;

        machine.advance(RequestState::Delivering);
        deliver(
            self.bot.as_ref(),
            &message.chat,
            Artifact::Image {
                bytes,
                caption: None,
            },
        )
        .await?;

        machine.advance(RequestState::Done);
        info!(chat_id = message.chat.id, "Image sent");
        Ok(())
    }
}

#[async_trait]
impl Handler for ImageHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(prompt) = flow::claim(&self.bot_username, &message.content, Command::Image).await
        else {
            return Ok(HandlerResponse::Continue);
        };
        self.process(message, &prompt).await;
        Ok(HandlerResponse::Stop)
    }
}
