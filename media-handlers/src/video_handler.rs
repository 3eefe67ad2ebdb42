use std::num::{NonZeroU32, NonZeroUsize};
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, ChatAction, Handler, HandlerResponse, Message, Result};
use generation_provider::{GenerationProvider, Prompt, Resolution};
use media_pipeline::{
    deliver, materialize, Artifact, FrameSequence, PipelineError, RequestMachine, RequestState,
    VideoAssembler, Workspace,
};
use tracing::{debug, info, instrument};

use crate::command::Command;
use crate::flow;
use crate::BotUsername;

/// How `/video` requests are produced.
#[derive(Debug, Clone)]
pub struct VideoSettings {
    pub frame_count: NonZeroUsize,
    pub fps: NonZeroU32,
    pub frame_size: Resolution,
    pub caption: Option<String>,
    /// Parent directory for request workspaces; system temp dir when `None`.
    pub workspace_root: Option<PathBuf>,
}

/// Prompt for frame `index` (0-based) of `total`: the user's prompt followed by the position.
pub fn frame_prompt(prompt: &Prompt, index: usize, total: usize) -> String {
    format!("{} - frame {}/{}", prompt.as_str(), index + 1, total)
}

/// `/video <prompt>`: N generated frames encoded into a slideshow and sent as a video.
///
/// Frames are generated sequentially. The request's [`Workspace`] exists from the first frame
/// until after delivery and is removed on every exit path.
#[derive(Clone)]
pub struct VideoHandler {
    bot_username: BotUsername,
    provider: Arc<dyn GenerationProvider>,
    assembler: Arc<dyn VideoAssembler>,
    bot: Arc<dyn CoreBot>,
    settings: VideoSettings,
}

impl VideoHandler {
    pub fn new(
        bot_username: BotUsername,
        provider: Arc<dyn GenerationProvider>,
        assembler: Arc<dyn VideoAssembler>,
        bot: Arc<dyn CoreBot>,
        settings: VideoSettings,
    ) -> Self {
        Self {
            bot_username,
            provider,
            assembler,
            bot,
            settings,
        }
    }

    pub async fn process(&self, message: &Message, prompt: &str) -> RequestMachine {
        let mut machine = RequestMachine::new(Command::Video.name());
        if let Err(e) = self.run(&mut machine, message, prompt).await {
            flow::report_failure(self.bot.as_ref(), &message.chat, &mut machine, Command::Video, &e)
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
        let prompt = flow::validate(machine, Command::Video, prompt)?;
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            prompt_preview = %prompt.preview(100),
            frames = self.settings.frame_count.get(),
            fps = self.settings.fps.get(),
            "Processing video request"
        );
        flow::show_action(self.bot.as_ref(), &message.chat, ChatAction::UploadVideo).await;

        let workspace = Workspace::create(self.settings.workspace_root.as_deref())?;
        let result = self.run_in(&workspace, machine, message, &prompt).await;
        workspace.close();
        result
    }

    async fn run_in(
        &self,
        workspace: &Workspace,
        machine: &mut RequestMachine,
        message: &Message,
        prompt: &Prompt,
    ) -> std::result::Result<(), PipelineError> {
        let total = self.settings.frame_count.get();
        let mut frames = FrameSequence::new(self.settings.frame_count);
        for index in 0..total {
            machine.advance(RequestState::Generating {
                frame: index + 1,
                total,
            });
            let per_frame = Prompt::new(frame_prompt(prompt, index, total))
                .ok_or_else(|| PipelineError::Validation("empty frame prompt".into()))?;
            let bytes = self
                .provider
                .generate_image(&per_frame, self.settings.frame_size)
                .await?;
            debug!(frame = index, bytes = bytes.len(), "Frame generated");
            frames.push(bytes).map_err(|_| {
                PipelineError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("frame sequence already holds {} frames", total),
                ))
            })?;
        }

        machine.advance(RequestState::Materializing);
        let paths = materialize(&frames, workspace).await?;

        machine.advance(RequestState::Assembling);
        let video = self
            .assembler
            .assemble(&paths, self.settings.fps, workspace)
            .await?;

        machine.advance(RequestState::Delivering);
        deliver(
            self.bot.as_ref(),
            &message.chat,
            Artifact::Video {
                path: video,
                caption: self.settings.caption.clone(),
            },
        )
        .await?;

        machine.advance(RequestState::Done);
        info!(chat_id = message.chat.id, frames = total, "Video sent");
        Ok(())
    }
}

#[async_trait]
impl Handler for VideoHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(prompt) = flow::claim(&self.bot_username, &message.content, Command::Video).await
        else {
            return Ok(HandlerResponse::Continue);
        };
        self.process(message, &prompt).await;
        Ok(HandlerResponse::Stop)
    }
}
