use anyhow::Result;
use groupcast_chain::HandlerChain;
use groupcast_core::{init_tracing, Bot};
use groupcast_telegram::{run_dispatcher, TelegramBotAdapter};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::config::{BotConfig, BroadcastConfig};
use crate::dispatcher::BroadcastDispatcher;
use crate::handlers::{AuthHandler, BroadcastHandler, LoggingHandler};

/// Chain for every update: logging, then the operator gate, then the broadcast workflow.
///
/// `bot` is used for all outbound calls, so tests can pass a mock.
pub fn build_handler_chain(
    settings: &BroadcastConfig,
    bot: Arc<dyn Bot>,
    bot_username: Arc<RwLock<Option<String>>>,
) -> HandlerChain {
    let registry = Arc::new(settings.registry.clone());
    let dispatcher = BroadcastDispatcher::new(bot.clone(), settings.concurrency);

    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(AuthHandler::new(settings.operator_id, bot.clone())))
        .add_handler(Arc::new(BroadcastHandler::new(
            bot,
            registry,
            dispatcher,
            bot_username,
        )))
}

/// Main entry: validate config, init logging, build the chain, then poll Telegram until Ctrl+C.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        operator_id = config.operator_id(),
        groups = config.registry().len(),
        concurrency = config.broadcast_concurrency(),
        "Initializing bot"
    );

    let teloxide_bot = config.base().telegram().build_bot()?;
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let bot_username = Arc::new(RwLock::new(None));
    let handler_chain = build_handler_chain(config.broadcast(), bot, bot_username.clone());

    info!("Bot started successfully");

    run_dispatcher(teloxide_bot, handler_chain, bot_username).await
}
