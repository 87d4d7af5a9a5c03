//! Bot configuration: BaseConfig (Telegram + log) + BroadcastConfig (operator, groups, fan-out).

mod base;
mod bot_config;
mod broadcast;

#[cfg(test)]
mod tests;

pub use base::{BaseConfig, DEFAULT_LOG_FILE};
pub use bot_config::BotConfig;
pub use broadcast::{
    parse_concurrency, parse_group_ids, parse_group_names, parse_operator_id, BroadcastConfig,
    DEFAULT_BROADCAST_CONCURRENCY,
};
