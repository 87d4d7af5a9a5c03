//! BotConfig: BaseConfig + BroadcastConfig. Use load() for env-based loading.

use anyhow::Result;

use super::{BaseConfig, BroadcastConfig};
use crate::registry::GroupRegistry;

pub struct BotConfig {
    pub base: BaseConfig,
    pub broadcast: BroadcastConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let broadcast = BroadcastConfig::from_env()?;
        Ok(Self { base, broadcast })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn broadcast(&self) -> &BroadcastConfig {
        &self.broadcast
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn operator_id(&self) -> i64 {
        self.broadcast.operator_id
    }
    pub fn registry(&self) -> &GroupRegistry {
        &self.broadcast.registry
    }
    pub fn broadcast_concurrency(&self) -> usize {
        self.broadcast.concurrency
    }
}
