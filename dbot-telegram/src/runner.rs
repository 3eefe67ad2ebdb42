//! REPL runner: converts teloxide messages to core::Message and passes them to the HandlerChain.
//! Calls get_me() first to populate bot_username (used to filter `/cmd@otherbot`).

use anyhow::Result;
use dbot_core::ToCoreMessage;
use handler_chain::HandlerChain;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use super::adapters::TelegramMessageWrapper;

const TEXT_PREVIEW_CHARS: usize = 100;

/// First `max_chars` characters of `text`, with `...` appended when cut.
fn text_preview(text: &str, max_chars: usize) -> String {
    let mut preview: String = text.chars().take(max_chars).collect();
    if text.chars().nth(max_chars).is_some() {
        preview.push_str("...");
    }
    preview
}

/// Starts the REPL with the given teloxide Bot, HandlerChain, and bot_username cache.
/// Each message is converted to core::Message and handled in its own spawned task, so long
/// generations never block other chats. Returns when the REPL stops (Ctrl-C).
#[instrument(skip(bot, handler_chain, bot_username))]
pub async fn run_repl(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    bot_username: Arc<tokio::sync::RwLock<Option<String>>>,
) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => {
            if let Some(username) = &me.user.username {
                *bot_username.write().await = Some(username.clone());
                info!(username = %username, "Bot username set before repl");
            }
        }
        Err(e) => error!(error = %e, "get_me failed; @bot suffixes on commands will not be checked"),
    }

    let chain = handler_chain;
    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = chain.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();

            match msg.text() {
                Some(text) => {
                    info!(
                        user_id = core_msg.user.id,
                        chat_id = core_msg.chat.id,
                        text_preview = %text_preview(text, TEXT_PREVIEW_CHARS),
                        "Received message"
                    );
                }
                None => {
                    info!(
                        user_id = core_msg.user.id,
                        chat_id = core_msg.chat.id,
                        "Received non-text message, skipping"
                    );
                    return respond(());
                }
            }

            tokio::spawn(async move {
                if let Err(e) = chain.handle(&core_msg).await {
                    error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
                }
            });

            respond(())
        }
    })
    .await;

    info!("REPL stopped");
    Ok(())
}
