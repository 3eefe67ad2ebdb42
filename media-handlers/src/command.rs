//! `/<command>[@botname] <prompt...>` parsing.

use std::fmt;

use crate::messages;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Image,
    Ask,
    Video,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Image => "image",
            Command::Ask => "ask",
            Command::Video => "video",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        [Command::Start, Command::Image, Command::Ask, Command::Video]
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Reply for a command sent without its prompt.
    pub fn missing_prompt_message(&self) -> Option<&'static str> {
        match self {
            Command::Start => None,
            Command::Image => Some(messages::MISSING_IMAGE_PROMPT),
            Command::Ask => Some(messages::MISSING_QUESTION),
            Command::Video => Some(messages::MISSING_VIDEO_PROMPT),
        }
    }

    /// Generic reply for any failure after validation.
    pub fn failure_message(&self) -> Option<&'static str> {
        match self {
            Command::Start => None,
            Command::Image => Some(messages::IMAGE_FAILED),
            Command::Ask => Some(messages::ANSWER_FAILED),
            Command::Video => Some(messages::VIDEO_FAILED),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub command: Command,
    /// Text after the command token, surrounding whitespace trimmed. May be empty.
    pub prompt: String,
}

/// Parses a chat message as a command.
///
/// Returns `None` for plain text, unknown commands, and commands addressed to a different bot
/// (`/image@other_bot`). A `@botname` suffix is accepted while our own username is unknown.
pub fn parse_command(text: &str, bot_username: Option<&str>) -> Option<ParsedCommand> {
    let text = text.trim_start();
    let rest = text.strip_prefix('/')?;
    let (token, prompt) = match rest.find(char::is_whitespace) {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, ""),
    };

    let name = match token.split_once('@') {
        Some((name, target)) => {
            if let Some(own) = bot_username {
                if !target.eq_ignore_ascii_case(own) {
                    return None;
                }
            }
            name
        }
        None => token,
    };

    Some(ParsedCommand {
        command: Command::from_name(name)?,
        prompt: prompt.trim().to_string(),
    })
}
