//! Wraps teloxide::Bot and implements [`dbot_core::Bot`]. Production code sends replies via Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, Chat, ChatAction, DbotError, Result};
use std::path::Path;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile};
use tracing::{debug, error};

/// Builds a teloxide Bot for `token`, pointing at `api_url` when given (e.g. a local Bot API server or a test mock).
/// An unparsable URL is logged and the default API is used; callers validate the URL at config load.
pub fn build_teloxide_bot(token: &str, api_url: Option<&str>) -> teloxide::Bot {
    let bot = teloxide::Bot::new(token);
    match api_url {
        Some(url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

fn to_teloxide_action(action: ChatAction) -> teloxide::types::ChatAction {
    match action {
        ChatAction::Typing => teloxide::types::ChatAction::Typing,
        ChatAction::UploadPhoto => teloxide::types::ChatAction::UploadPhoto,
        ChatAction::UploadVideo => teloxide::types::ChatAction::UploadVideo,
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_photo(&self, chat: &Chat, image: Vec<u8>, caption: Option<&str>) -> Result<()> {
        debug!(chat_id = chat.id, bytes = image.len(), "Uploading photo");
        let mut request = self
            .bot
            .send_photo(ChatId(chat.id), InputFile::memory(image).file_name("image.png"));
        if let Some(caption) = caption {
            request = request.caption(caption.to_string());
        }
        request.await.map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_video(&self, chat: &Chat, path: &Path, caption: Option<&str>) -> Result<()> {
        debug!(chat_id = chat.id, path = %path.display(), "Uploading video");
        let mut request = self
            .bot
            .send_video(ChatId(chat.id), InputFile::file(path.to_path_buf()));
        if let Some(caption) = caption {
            request = request.caption(caption.to_string());
        }
        request.await.map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_chat_action(&self, chat: &Chat, action: ChatAction) -> Result<()> {
        self.bot
            .send_chat_action(ChatId(chat.id), to_teloxide_action(action))
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }
}
