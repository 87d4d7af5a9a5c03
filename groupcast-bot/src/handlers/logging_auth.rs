//! Handlers for logging and operator-only authorization.

use async_trait::async_trait;
use groupcast_core::{Bot, Chat, Handler, HandlerResponse, Result, Update};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::views::REFUSAL_TEXT;

/// Logs each update in before() and the response in after(); always continues.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, update))]
    async fn before(&self, update: &Update) -> Result<bool> {
        let user = update.user();
        match update {
            Update::Message(m) => info!(
                user_id = user.id,
                username = %user.username.as_deref().unwrap_or("unknown"),
                message_type = %m.message_type,
                "Received message"
            ),
            Update::Callback(q) => info!(
                user_id = user.id,
                username = %user.username.as_deref().unwrap_or("unknown"),
                data = %q.data,
                "Received callback"
            ),
        }
        Ok(true)
    }

    #[instrument(skip(self, update, response))]
    async fn after(&self, update: &Update, response: &HandlerResponse) -> Result<()> {
        debug!(
            update_id = %update.id(),
            response = ?response,
            "Processed update"
        );
        Ok(())
    }
}

/// Lets only the operator through. Everyone else gets the fixed refusal and the chain stops, for messages and button presses alike.
pub struct AuthHandler {
    operator_id: i64,
    bot: Arc<dyn Bot>,
}

impl AuthHandler {
    pub fn new(operator_id: i64, bot: Arc<dyn Bot>) -> Self {
        Self { operator_id, bot }
    }

    pub fn is_authorized(&self, user_id: i64) -> bool {
        user_id == self.operator_id
    }
}

#[async_trait]
impl Handler for AuthHandler {
    #[instrument(skip(self, update))]
    async fn before(&self, update: &Update) -> Result<bool> {
        let user_id = update.user().id;
        if self.is_authorized(user_id) {
            debug!(user_id = user_id, "Operator authorized");
            return Ok(true);
        }

        warn!(user_id = user_id, kind = update.kind(), "Unauthorized access attempt");
        match update {
            Update::Message(m) => self.bot.reply_to(m, REFUSAL_TEXT).await?,
            Update::Callback(q) => {
                // Private chat id equals the user id when the keyboard message is gone.
                let chat = q.chat.clone().unwrap_or_else(|| Chat::with_id(user_id));
                self.bot.send_message(&chat, REFUSAL_TEXT).await?
            }
        }
        Ok(false)
    }
}
