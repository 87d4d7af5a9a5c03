//! Bot abstraction for sending text, media and inline keyboards.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in groupcast-telegram,
//! tests substitute a recording mock.

use crate::error::{GroupcastError, Result};
use crate::types::{Attachment, Chat, Keyboard, Message};
use async_trait::async_trait;

/// Outbound operations used by handlers. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Re-sends media by its transport reference, with an optional caption. Captions are ignored for kinds that cannot carry one (stickers).
    async fn send_media(
        &self,
        chat: &Chat,
        attachment: &Attachment,
        caption: Option<&str>,
    ) -> Result<()>;
    /// Sends a text message with an inline keyboard and returns its id for later edits.
    async fn send_keyboard(&self, chat: &Chat, text: &str, keyboard: &Keyboard)
        -> Result<String>;
    /// Replaces text and keyboard of a message sent with [`Bot::send_keyboard`]. `message_id` is transport-specific (e.g. Telegram numeric string).
    async fn edit_keyboard(
        &self,
        chat: &Chat,
        message_id: &str,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<()>;
}

/// Parses a message id string into an i32. Used by keyboard edits.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| GroupcastError::Bot(format!("Invalid message_id for edit: {}", s)))
}
