//! # genbot
//!
//! Telegram bot wiring: configuration from env, component factory (Telegram transport,
//! generation backend, ffmpeg assembler), handler chain and the REPL entry point.

pub mod cli;
pub mod components;
pub mod config;
pub mod runner;

pub use cli::{Cli, Commands};
pub use components::{
    build_bot_components, build_handler_chain, create_provider, BotComponents, ComponentOverrides,
};
pub use config::{BaseConfig, BotConfig, GenerationConfig, VideoConfig};
pub use runner::{build_only, run_bot};
