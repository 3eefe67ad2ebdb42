//! The seam between the bot and whatever produces text and pixels.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Prompt, ProviderKind, Resolution};

/// A generation backend. One instance is built at startup and shared by every handler.
///
/// Implementations perform exactly one upstream call per method invocation and never retry;
/// a failure is reported to the caller, which decides what the user sees.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generates one still image and returns its encoded bytes (PNG or whatever the
    /// backend returns; Telegram sniffs the format).
    async fn generate_image(&self, prompt: &Prompt, resolution: Resolution) -> Result<Vec<u8>>;

    /// Answers a free-form question.
    async fn generate_text(&self, prompt: &Prompt) -> Result<String>;

    /// Verifies the backend is reachable before the bot starts accepting messages.
    async fn health_check(&self) -> Result<()>;

    fn kind(&self) -> ProviderKind;
}
