//! # media-handlers
//!
//! One [`dbot_core::Handler`] per chat command. Each handler claims only its own command and
//! lets everything else continue down the chain:
//!
//! | Command | Handler | Flow |
//! |---------|---------|------|
//! | `/start` | [`StartHandler`] | static help text |
//! | `/image <prompt>` | [`ImageHandler`] | one image → photo |
//! | `/ask <question>` | [`AskHandler`] | one answer → text |
//! | `/video <prompt>` | [`VideoHandler`] | N frames → workspace → ffmpeg → video |
//!
//! Every request runs its own [`media_pipeline::RequestMachine`]; failures end in exactly one
//! user-facing message.

mod ask_handler;
mod command;
mod flow;
mod image_handler;
pub mod messages;
mod start_handler;
mod video_handler;

pub use ask_handler::AskHandler;
pub use command::{parse_command, Command, ParsedCommand};
pub use image_handler::ImageHandler;
pub use start_handler::StartHandler;
pub use video_handler::{frame_prompt, VideoHandler, VideoSettings};

/// Bot username resolved at startup via `getMe`; `None` until then.
pub type BotUsername = std::sync::Arc<tokio::sync::RwLock<Option<String>>>;
