use std::path::PathBuf;

use dbot_core::{Bot, Chat};
use tracing::{info, instrument};

use crate::error::{PipelineError, Result};

/// What a finished request hands to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    Text(String),
    Image {
        bytes: Vec<u8>,
        caption: Option<String>,
    },
    /// The file lives in the request workspace, which must outlive the delivery call.
    Video {
        path: PathBuf,
        caption: Option<String>,
    },
}

impl Artifact {
    pub fn kind(&self) -> &'static str {
        match self {
            Artifact::Text(_) => "text",
            Artifact::Image { .. } => "image",
            Artifact::Video { .. } => "video",
        }
    }
}

/// Sends `artifact` to `chat`. Transport errors become [`PipelineError::Delivery`].
#[instrument(skip(bot, artifact), fields(chat_id = chat.id, artifact = artifact.kind()))]
pub async fn deliver(bot: &dyn Bot, chat: &Chat, artifact: Artifact) -> Result<()> {
    let sent = match artifact {
        Artifact::Text(text) => bot.send_message(chat, &text).await,
        Artifact::Image { bytes, caption } => bot.send_photo(chat, bytes, caption.as_deref()).await,
        Artifact::Video { path, caption } => {
            bot.send_video(chat, &path, caption.as_deref()).await
        }
    };
    sent.map_err(|e| PipelineError::Delivery(e.to_string()))?;
    info!("Artifact delivered");
    Ok(())
}
