//! # groupcast-telegram
//!
//! Telegram transport layer: adapters, [`groupcast_core::Bot`] implementation, minimal config, dispatcher runner.
//! Handles only Telegram connectivity and handler-chain execution; no broadcast logic.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{inline_markup, TelegramBotAdapter};
pub use config::{api_url_from_env, TelegramConfig};
pub use runner::{run_chain, run_dispatcher};
