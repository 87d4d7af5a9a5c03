//! Adapters from Telegram (teloxide) types to groupcast_core types.
//! Depends only on teloxide and groupcast_core type definitions.

use groupcast_core::{
    Attachment, AttachmentKind, CallbackQuery, Chat, Message, ToCoreCallback, ToCoreMessage,
    ToCoreUser, User,
};
use teloxide::types::{MessageEntity, MessageEntityKind};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

fn anonymous_user() -> User {
    User {
        id: 0,
        username: None,
        first_name: None,
        last_name: None,
    }
}

fn core_chat(chat: &teloxide::types::Chat) -> Chat {
    let chat_type = if chat.is_private() {
        "private"
    } else if chat.is_group() {
        "group"
    } else if chat.is_supergroup() {
        "supergroup"
    } else if chat.is_channel() {
        "channel"
    } else {
        "unknown"
    };
    Chat {
        id: chat.id.0,
        chat_type: chat_type.to_string(),
    }
}

/// True when the first entity is a bot command at offset 0 (`/start`, `/start@bot`).
fn opens_with_command(entities: Option<&[MessageEntity]>) -> bool {
    entities
        .unwrap_or_default()
        .iter()
        .any(|e| e.offset == 0 && e.kind == MessageEntityKind::BotCommand)
}

/// Wraps a teloxide Message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(anonymous_user),
            chat: core_chat(&self.0.chat),
            content: self.0.text().unwrap_or("").to_string(),
            message_type: self.message_type().to_string(),
            attachment: self.attachment(),
            caption: self.0.caption().map(|s| s.to_string()),
            command: opens_with_command(self.0.entities()),
            created_at: chrono::Utc::now(),
        }
    }
}

impl<'a> TelegramMessageWrapper<'a> {
    /// Media that can be re-sent by file id. Photos resolve to their largest size.
    fn attachment(&self) -> Option<Attachment> {
        let msg = self.0;
        let (kind, file_id) = if let Some(sizes) = msg.photo() {
            (AttachmentKind::Photo, sizes.last()?.file.id.to_string())
        } else if let Some(video) = msg.video() {
            (AttachmentKind::Video, video.file.id.to_string())
        } else if let Some(document) = msg.document() {
            (AttachmentKind::Document, document.file.id.to_string())
        } else if let Some(sticker) = msg.sticker() {
            (AttachmentKind::Sticker, sticker.file.id.to_string())
        } else if let Some(animation) = msg.animation() {
            (AttachmentKind::Animation, animation.file.id.to_string())
        } else {
            return None;
        };
        Some(Attachment { kind, file_id })
    }

    /// Label of what the message carries, including kinds the bot does not resend.
    fn message_type(&self) -> &'static str {
        let msg = self.0;
        if msg.text().is_some() {
            "text"
        } else if let Some(attachment) = self.attachment() {
            attachment.kind.as_str()
        } else if msg.voice().is_some() {
            "voice"
        } else if msg.audio().is_some() {
            "audio"
        } else if msg.video_note().is_some() {
            "video_note"
        } else if msg.location().is_some() {
            "location"
        } else if msg.contact().is_some() {
            "contact"
        } else if msg.poll().is_some() {
            "poll"
        } else if msg.dice().is_some() {
            "dice"
        } else {
            "other"
        }
    }
}

/// Wraps a teloxide CallbackQuery for conversion to core [`CallbackQuery`].
pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> ToCoreCallback for TelegramCallbackWrapper<'a> {
    fn to_core(&self) -> CallbackQuery {
        let q = self.0;
        CallbackQuery {
            id: q.id.to_string(),
            user: TelegramUserWrapper(&q.from).to_core(),
            chat: q.message.as_ref().map(|m| core_chat(m.chat())),
            message_id: q.message.as_ref().map(|m| m.id().to_string()),
            data: q.data.clone().unwrap_or_default(),
        }
    }
}
