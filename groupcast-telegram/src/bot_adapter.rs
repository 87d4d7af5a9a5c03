//! Wraps teloxide::Bot and implements [`groupcast_core::Bot`]. Production code talks to Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use groupcast_core::{
    parse_message_id, Attachment, AttachmentKind, Bot as CoreBot, Chat, GroupcastError, Keyboard,
    Message, Result,
};
use teloxide::{
    prelude::*,
    types::{ChatId, FileId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, MessageId},
};

/// Thin wrapper around teloxide::Bot that implements groupcast-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

fn bot_error(e: teloxide::RequestError) -> GroupcastError {
    GroupcastError::Bot(e.to_string())
}

/// Maps a core keyboard to Telegram's inline markup.
pub fn inline_markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.data.clone()))
            .collect::<Vec<_>>()
    }))
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    async fn send_media(
        &self,
        chat: &Chat,
        attachment: &Attachment,
        caption: Option<&str>,
    ) -> Result<()> {
        let chat_id = ChatId(chat.id);
        let file = InputFile::file_id(FileId(attachment.file_id.clone()));
        let caption = caption.map(|c| c.to_string());

        let result = match attachment.kind {
            AttachmentKind::Photo => {
                let mut req = self.bot.send_photo(chat_id, file);
                if let Some(c) = caption {
                    req = req.caption(c);
                }
                req.await.map(|_| ())
            }
            AttachmentKind::Video => {
                let mut req = self.bot.send_video(chat_id, file);
                if let Some(c) = caption {
                    req = req.caption(c);
                }
                req.await.map(|_| ())
            }
            AttachmentKind::Document => {
                let mut req = self.bot.send_document(chat_id, file);
                if let Some(c) = caption {
                    req = req.caption(c);
                }
                req.await.map(|_| ())
            }
            AttachmentKind::Sticker => self.bot.send_sticker(chat_id, file).await.map(|_| ()),
            AttachmentKind::Animation => {
                let mut req = self.bot.send_animation(chat_id, file);
                if let Some(c) = caption {
                    req = req.caption(c);
                }
                req.await.map(|_| ())
            }
        };
        result.map_err(bot_error)
    }

    async fn send_keyboard(
        &self,
        chat: &Chat,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<String> {
        let sent = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .reply_markup(inline_markup(keyboard))
            .await
            .map_err(bot_error)?;
        Ok(sent.id.to_string())
    }

    async fn edit_keyboard(
        &self,
        chat: &Chat,
        message_id: &str,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .edit_message_text(ChatId(chat.id), MessageId(id), text.to_string())
            .reply_markup(inline_markup(keyboard))
            .await
            .map_err(bot_error)?;
        Ok(())
    }
}
