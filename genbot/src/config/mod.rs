//! Bot configuration: BaseConfig (Telegram + log) + GenerationConfig (backend) + VideoConfig
//! (video pipeline). Everything is loaded from the environment.

mod base;
mod bot_config;
mod env;
mod generation;
mod video;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use generation::GenerationConfig;
pub use video::VideoConfig;
