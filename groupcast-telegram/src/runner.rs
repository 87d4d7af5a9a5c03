//! Dispatcher runner: converts teloxide messages and callback queries to core updates and passes them to the HandlerChain.
//! Fetches the bot username with get_me before polling so command parsing can accept `/cmd@botname`.

use anyhow::Result;
use groupcast_chain::HandlerChain;
use groupcast_core::{ToCoreCallback, ToCoreMessage, Update as CoreUpdate};
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use tracing::{error, info, instrument, warn};

use super::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};

/// Starts long polling with the given teloxide Bot and HandlerChain.
///
/// Updates are handled inline, not spawned: teloxide already runs updates of one chat in order, and
/// session state must observe them in that order.
#[instrument(skip(bot, handler_chain, bot_username))]
pub async fn run_dispatcher(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    bot_username: Arc<tokio::sync::RwLock<Option<String>>>,
) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => {
            if let Some(username) = &me.user.username {
                *bot_username.write().await = Some(username.clone());
                info!(username = %username, "Bot username set before dispatch");
            }
        }
        Err(e) => warn!(error = %e, "get_me failed, commands addressed as /cmd@bot will not match"),
    }

    Dispatcher::builder(bot, update_handler())
        .dependencies(dptree::deps![handler_chain])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

fn update_handler() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_callback_query().endpoint(handle_callback))
}

async fn handle_message(msg: teloxide::types::Message, chain: HandlerChain) -> ResponseResult<()> {
    let core_msg = TelegramMessageWrapper(&msg).to_core();
    info!(
        user_id = core_msg.user.id,
        chat_id = core_msg.chat.id,
        message_type = %core_msg.message_type,
        "Received message"
    );
    run_chain(&chain, CoreUpdate::Message(core_msg)).await;
    Ok(())
}

async fn handle_callback(
    bot: teloxide::Bot,
    q: teloxide::types::CallbackQuery,
    chain: HandlerChain,
) -> ResponseResult<()> {
    // Acknowledge first; feedback goes out as separate messages.
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        warn!(error = %e, "Failed to answer callback query");
    }

    let core_q = TelegramCallbackWrapper(&q).to_core();
    info!(
        user_id = core_q.user.id,
        data = %core_q.data,
        "Received callback query"
    );
    run_chain(&chain, CoreUpdate::Callback(core_q)).await;
    Ok(())
}

/// Runs the chain for one update; failures are logged and the update is dropped.
pub async fn run_chain(chain: &HandlerChain, update: CoreUpdate) {
    if let Err(e) = chain.handle(&update).await {
        error!(
            error = %e,
            user_id = update.user().id,
            kind = update.kind(),
            "Handler chain failed"
        );
    }
}
