//! Steps shared by the command handlers.

use dbot_core::{Bot, Chat, ChatAction};
use generation_provider::Prompt;
use media_pipeline::{FailureKind, PipelineError, RequestMachine, RequestState};
use tracing::{error, info, warn};

use crate::command::{parse_command, Command};
use crate::BotUsername;

/// Returns the prompt when `text` is `command` addressed to us.
pub(crate) async fn claim(bot_username: &BotUsername, text: &str, command: Command) -> Option<String> {
    let username = bot_username.read().await;
    let parsed = parse_command(text, username.as_deref())?;
    (parsed.command == command).then_some(parsed.prompt)
}

/// `Idle → Validating`, then the prompt must be non-blank.
pub(crate) fn validate(
    machine: &mut RequestMachine,
    command: Command,
    raw: &str,
) -> Result<Prompt, PipelineError> {
    machine.advance(RequestState::Validating);
    Prompt::new(raw).ok_or_else(|| PipelineError::Validation(format!("empty prompt for {}", command)))
}

/// Best effort; a failed chat action never fails the request.
pub(crate) async fn show_action(bot: &dyn Bot, chat: &Chat, action: ChatAction) {
    if let Err(e) = bot.send_chat_action(chat, action).await {
        warn!(chat_id = chat.id, action = %action, error = %e, "Failed to send chat action");
    }
}

/// Moves the request to `Failed` and sends the one reply the user gets for it.
pub(crate) async fn report_failure(
    bot: &dyn Bot,
    chat: &Chat,
    machine: &mut RequestMachine,
    command: Command,
    err: &PipelineError,
) {
    let failed_in = machine.state();
    let kind = err.kind();
    machine.fail(kind);

    let reply = if kind == FailureKind::Validation {
        info!(command = %command, chat_id = chat.id, "Rejected command without prompt");
        command.missing_prompt_message()
    } else {
        error!(
            command = %command,
            chat_id = chat.id,
            state = %failed_in,
            error = %err,
            "Request failed"
        );
        command.failure_message()
    };

    if let Some(reply) = reply {
        if let Err(e) = bot.send_message(chat, reply).await {
            error!(chat_id = chat.id, error = %e, "Failed to send error reply");
        }
    }
}
