//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use anyhow::{Context, Result};
use dbot_telegram::{build_teloxide_bot, TelegramBotAdapter};
use generation_provider::{GenerationProvider, HostedProvider, LocalModelProvider, ProviderKind};
use handler_chain::HandlerChain;
use media_handlers::{AskHandler, BotUsername, ImageHandler, StartHandler, VideoHandler};
use media_pipeline::{FfmpegAssembler, VideoAssembler};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::config::{BotConfig, GenerationConfig};

/// Process-wide dependencies, built once at startup and shared with every handler.
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    pub bot_username: BotUsername,
    /// Bot used by handlers to reply; the Telegram adapter unless overridden in tests.
    pub handler_bot: Arc<dyn dbot_core::Bot>,
    pub provider: Arc<dyn GenerationProvider>,
    pub assembler: Arc<dyn VideoAssembler>,
}

/// Replacements for the real transport, backend and encoder (tests, alternative wiring).
#[derive(Default)]
pub struct ComponentOverrides {
    pub handler_bot: Option<Arc<dyn dbot_core::Bot>>,
    pub provider: Option<Arc<dyn GenerationProvider>>,
    pub assembler: Option<Arc<dyn VideoAssembler>>,
}

/// Creates the generation backend selected by GENERATION_BACKEND.
pub fn create_provider(config: &GenerationConfig) -> Arc<dyn GenerationProvider> {
    match config.backend {
        ProviderKind::Hosted => {
            info!(
                image_model = %config.image_model,
                text_model = %config.text_model,
                api_key = %config.masked_api_key(),
                "Using hosted generation backend"
            );
            Arc::new(HostedProvider::new(config.hosted()))
        }
        ProviderKind::Local => {
            info!(
                image_url = %config.local_image_url,
                text_url = %config.local_text_url,
                "Using local generation backend"
            );
            Arc::new(LocalModelProvider::new(config.local()))
        }
    }
}

/// Builds BotComponents and checks the generation backend is reachable.
#[instrument(skip(config, overrides))]
pub async fn build_bot_components(
    config: &BotConfig,
    overrides: ComponentOverrides,
) -> Result<BotComponents> {
    let teloxide_bot = build_teloxide_bot(config.bot_token(), config.telegram_api_url());
    let bot_username = Arc::new(tokio::sync::RwLock::new(None));

    let handler_bot: Arc<dyn dbot_core::Bot> = match overrides.handler_bot {
        Some(bot) => bot,
        None => Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())),
    };

    let provider = match overrides.provider {
        Some(provider) => provider,
        None => create_provider(&config.generation),
    };
    provider
        .health_check()
        .await
        .with_context(|| format!("{} generation backend is not reachable", provider.kind()))?;

    let assembler: Arc<dyn VideoAssembler> = match overrides.assembler {
        Some(assembler) => assembler,
        None => {
            let ffmpeg = FfmpegAssembler::new(config.video.ffmpeg_path.clone());
            if let Err(e) = ffmpeg.probe().await {
                warn!(error = %e, "ffmpeg unavailable; /video requests will fail");
            }
            Arc::new(ffmpeg)
        }
    };

    Ok(BotComponents {
        teloxide_bot,
        bot_username,
        handler_bot,
        provider,
        assembler,
    })
}

/// Builds the handler chain: start → image → ask → video.
pub fn build_handler_chain(config: &BotConfig, components: &BotComponents) -> HandlerChain {
    let bot = components.handler_bot.clone();
    let username = components.bot_username.clone();
    let provider = components.provider.clone();

    HandlerChain::new()
        .add_handler(Arc::new(StartHandler::new(username.clone(), bot.clone())))
        .add_handler(Arc::new(ImageHandler::new(
            username.clone(),
            provider.clone(),
            bot.clone(),
            config.generation.image_size,
        )))
        .add_handler(Arc::new(AskHandler::new(
            username.clone(),
            provider.clone(),
            bot.clone(),
        )))
        .add_handler(Arc::new(VideoHandler::new(
            username,
            provider,
            components.assembler.clone(),
            bot,
            config.video.settings(),
        )))
}

impl BotComponents {
    /// Releases process-wide resources after the dispatcher has stopped.
    pub async fn shutdown(self) {
        let backend = self.provider.kind();
        let username = self.bot_username.read().await.clone();
        drop(self);
        info!(
            backend = %backend,
            username = ?username,
            "Bot components shut down"
        );
    }
}
