//! Base config: Telegram connection and logging. Loaded from env.

use anyhow::Result;
use groupcast_telegram::{api_url_from_env, TelegramConfig};
use std::env;

pub const DEFAULT_LOG_FILE: &str = "logs/groupcast.log";

/// Telegram-related settings and log destination.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN, or the CLI override
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// LOG_FILE
    pub log_file: String,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());

        Ok(Self {
            bot_token,
            telegram_api_url: api_url_from_env(),
            log_file,
        })
    }

    pub fn telegram(&self) -> TelegramConfig {
        TelegramConfig::with_token(self.bot_token.clone())
            .with_api_url(self.telegram_api_url.clone())
    }

    /// Validate config (token present, API URL parses if set).
    pub fn validate(&self) -> Result<()> {
        self.telegram().validate()
    }
}
