//! Base config: Telegram Bot connection and logging. Loaded from env.

use anyhow::Result;

use super::env;

/// Base config: Telegram-related and logging only.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN (fallback TELEGRAM_TOKEN)
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// Log file path
    pub log_file: String,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token.or_else(|| env::var("BOT_TOKEN")).or_else(|| env::var("TELEGRAM_TOKEN")) {
            Some(token) => token,
            None => anyhow::bail!("BOT_TOKEN not set (pass --token or set BOT_TOKEN / TELEGRAM_TOKEN)"),
        };
        let log_file = env::var("LOG_FILE").unwrap_or_else(|| "logs/genbot.log".to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL").or_else(|| env::var("TELOXIDE_API_URL"));

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
        })
    }

    /// Validate config (e.g. telegram_api_url must be valid URL if set).
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}
