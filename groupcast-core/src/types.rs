//! Core types: user, chat, message, callback query, update, inline keyboard, and the Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat (group, channel or private) identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

impl Chat {
    /// Chat addressed only by id, e.g. a configured destination group.
    pub fn with_id(id: i64) -> Self {
        Self {
            id,
            chat_type: "unknown".to_string(),
        }
    }
}

/// Media kinds the bot can resend by reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttachmentKind {
    Photo,
    Video,
    Document,
    Sticker,
    Animation,
}

impl AttachmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentKind::Photo => "photo",
            AttachmentKind::Video => "video",
            AttachmentKind::Document => "document",
            AttachmentKind::Sticker => "sticker",
            AttachmentKind::Animation => "animation",
        }
    }
}

/// Media carried by a message. `file_id` is an opaque transport reference that can be sent again without re-uploading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub kind: AttachmentKind,
    pub file_id: String,
}

/// A single incoming message.
///
/// `content` holds the text body (empty when the message has none). `message_type` is the transport's
/// label for what was received ("text", "photo", "voice", ...) and is kept even for kinds that have no
/// [`Attachment`] representation, so callers can name what they rejected. `command` is set by the
/// transport when the text opens with a bot command entity, so "/r/rust is great" stays plain text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub message_type: String,
    pub attachment: Option<Attachment>,
    pub caption: Option<String>,
    pub command: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// True when the transport marked the text as a bot command (`/start`, `/start@bot`).
    pub fn is_command(&self) -> bool {
        self.command
    }
}

/// Button press on an inline keyboard.
///
/// `message_id` and `chat` identify the message carrying the keyboard, when Telegram still has it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub user: User,
    pub chat: Option<Chat>,
    pub message_id: Option<String>,
    pub data: String,
}

/// Everything the handler chain can receive.
#[derive(Debug, Clone)]
pub enum Update {
    Message(Message),
    Callback(CallbackQuery),
}

impl Update {
    /// The user who triggered the update.
    pub fn user(&self) -> &User {
        match self {
            Update::Message(m) => &m.user,
            Update::Callback(q) => &q.user,
        }
    }

    /// Chat the update came from, if known.
    pub fn chat(&self) -> Option<&Chat> {
        match self {
            Update::Message(m) => Some(&m.chat),
            Update::Callback(q) => q.chat.as_ref(),
        }
    }

    /// Transport id of the update (message id or callback query id).
    pub fn id(&self) -> &str {
        match self {
            Update::Message(m) => &m.id,
            Update::Callback(q) => &q.id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Update::Message(_) => "message",
            Update::Callback(_) => "callback",
        }
    }
}

/// One inline button: visible label and the callback data sent back when pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardButton {
    pub label: String,
    pub data: String,
}

impl KeyboardButton {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Inline keyboard attached to a message, row by row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<KeyboardButton>>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row of buttons.
    pub fn row(mut self, buttons: Vec<KeyboardButton>) -> Self {
        self.rows.push(buttons);
        self
    }

    /// All buttons in display order.
    pub fn buttons(&self) -> impl Iterator<Item = &KeyboardButton> {
        self.rows.iter().flatten()
    }
}

/// Handler result for the chain. `Reply(text)` carries the response body so handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach the text that was sent back to the user.
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Converts a transport-specific callback query to core [`CallbackQuery`].
pub trait ToCoreCallback: Send + Sync {
    fn to_core(&self) -> CallbackQuery;
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _update: &Update) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the update. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _update: &Update) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _update: &Update,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64) -> User {
        User {
            id,
            username: None,
            first_name: None,
            last_name: None,
        }
    }

    #[test]
    fn test_update_accessors_for_callback() {
        let update = Update::Callback(CallbackQuery {
            id: "cb-1".to_string(),
            user: user(7),
            chat: None,
            message_id: None,
            data: "toggle:0".to_string(),
        });
        assert_eq!(update.user().id, 7);
        assert!(update.chat().is_none());
        assert_eq!(update.id(), "cb-1");
        assert_eq!(update.kind(), "callback");
    }

    #[test]
    fn test_keyboard_buttons_flatten_rows_in_order() {
        let keyboard = Keyboard::new()
            .row(vec![KeyboardButton::new("a", "1"), KeyboardButton::new("b", "2")])
            .row(vec![KeyboardButton::new("c", "3")]);
        let data: Vec<&str> = keyboard.buttons().map(|b| b.data.as_str()).collect();
        assert_eq!(data, vec!["1", "2", "3"]);
    }
}
