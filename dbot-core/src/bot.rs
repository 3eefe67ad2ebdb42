//! Bot abstraction for sending replies.
//!
//! [`Bot`] is transport-agnostic; dbot-telegram implements it via teloxide, tests implement it
//! with recording mocks.

use crate::error::Result;
use crate::types::Chat;
use async_trait::async_trait;
use std::fmt;
use std::path::Path;

/// Status shown in the chat while a long request is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    Typing,
    UploadPhoto,
    UploadVideo,
}

impl fmt::Display for ChatAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Typing => write!(f, "typing"),
            Self::UploadPhoto => write!(f, "upload_photo"),
            Self::UploadVideo => write!(f, "upload_video"),
        }
    }
}

/// Abstraction for sending replies. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Uploads raw image bytes as a photo.
    async fn send_photo(&self, chat: &Chat, image: Vec<u8>, caption: Option<&str>) -> Result<()>;

    /// Uploads a video file from disk. The file must stay in place until this returns.
    async fn send_video(&self, chat: &Chat, path: &Path, caption: Option<&str>) -> Result<()>;

    /// Shows a chat action (e.g. "uploading video...").
    async fn send_chat_action(&self, chat: &Chat, action: ChatAction) -> Result<()>;
}
