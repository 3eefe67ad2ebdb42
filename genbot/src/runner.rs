use anyhow::Result;
use dbot_core::init_tracing;
use dbot_telegram::run_repl;
use handler_chain::HandlerChain;
use tracing::{info, instrument};

use super::components::{build_bot_components, build_handler_chain, BotComponents, ComponentOverrides};
use super::config::BotConfig;

/// Main entry: validate config, init logging, build components, run the REPL, then tear down.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        backend = %config.backend(),
        frames = config.video.frame_count.get(),
        fps = config.video.fps.get(),
        "Initializing bot"
    );

    let components = build_bot_components(&config, ComponentOverrides::default()).await?;
    let handler_chain = build_handler_chain(&config, &components);

    info!("Bot started successfully");

    let result = run_repl(
        components.teloxide_bot.clone(),
        handler_chain,
        components.bot_username.clone(),
    )
    .await;

    components.shutdown().await;
    result
}

/// Builds components and handler chain without starting the REPL or tracing. Used by
/// integration tests that inject a mock bot and drive the chain with fake messages.
#[instrument(skip(config, overrides))]
pub async fn build_only(
    config: &BotConfig,
    overrides: ComponentOverrides,
) -> Result<(BotComponents, HandlerChain)> {
    config.validate()?;
    info!(backend = %config.backend(), "Building bot (no REPL)");

    let components = build_bot_components(config, overrides).await?;
    let handler_chain = build_handler_chain(config, &components);
    Ok((components, handler_chain))
}
