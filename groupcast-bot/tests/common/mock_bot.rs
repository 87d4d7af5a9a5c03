//! Mock implementation of [`groupcast_core::Bot`] for integration tests.
//!
//! Records every outbound call in order so tests can assert on what each chat received without hitting
//! Telegram. Sends to chat ids registered with [`MockBot::fail_chat`] return a transport error.

use async_trait::async_trait;
use groupcast_core::{Attachment, Bot, Chat, GroupcastError, Keyboard, Message, Result};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// One recorded outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text {
        chat_id: i64,
        text: String,
    },
    Media {
        chat_id: i64,
        attachment: Attachment,
        caption: Option<String>,
    },
    Keyboard {
        chat_id: i64,
        message_id: String,
        text: String,
        keyboard: Keyboard,
    },
    Edit {
        chat_id: i64,
        message_id: String,
        text: String,
        keyboard: Keyboard,
    },
}

impl Sent {
    pub fn chat_id(&self) -> i64 {
        match self {
            Sent::Text { chat_id, .. }
            | Sent::Media { chat_id, .. }
            | Sent::Keyboard { chat_id, .. }
            | Sent::Edit { chat_id, .. } => *chat_id,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Sent::Text { text, .. } | Sent::Keyboard { text, .. } | Sent::Edit { text, .. } => {
                Some(text)
            }
            Sent::Media { caption, .. } => caption.as_deref(),
        }
    }
}

#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<Sent>>,
    attempts: Mutex<Vec<i64>>,
    failing: Mutex<HashSet<i64>>,
    next_message_id: AtomicUsize,
}

#[allow(dead_code)]
impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send to `chat_id` fails from now on.
    pub fn fail_chat(&self, chat_id: i64) {
        self.failing.lock().unwrap().insert(chat_id);
    }

    /// Successful calls, in order.
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Successful calls addressed to one chat.
    pub fn sent_to(&self, chat_id: i64) -> Vec<Sent> {
        self.sent()
            .into_iter()
            .filter(|s| s.chat_id() == chat_id)
            .collect()
    }

    /// Chat ids of every send attempt, failed or not.
    pub fn attempts(&self) -> Vec<i64> {
        self.attempts.lock().unwrap().clone()
    }

    /// Texts of plain messages sent to one chat.
    pub fn texts_to(&self, chat_id: i64) -> Vec<String> {
        self.sent_to(chat_id)
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Last text shown to a chat by any kind of call.
    pub fn last_text_to(&self, chat_id: i64) -> Option<String> {
        self.sent_to(chat_id)
            .iter()
            .rev()
            .find_map(|s| s.text().map(str::to_string))
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
        self.attempts.lock().unwrap().clear();
    }

    fn record(&self, chat_id: i64, sent: Sent) -> Result<()> {
        self.attempts.lock().unwrap().push(chat_id);
        if self.failing.lock().unwrap().contains(&chat_id) {
            return Err(GroupcastError::Bot(format!(
                "Forbidden: bot was kicked from chat {}",
                chat_id
            )));
        }
        self.sent.lock().unwrap().push(sent);
        Ok(())
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(
            chat.id,
            Sent::Text {
                chat_id: chat.id,
                text: text.to_string(),
            },
        )
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
        self.record(
            chat.id,
            Sent::Media {
                chat_id: chat.id,
                attachment: attachment.clone(),
                caption: caption.map(str::to_string),
            },
        )
    }

    async fn send_keyboard(
        &self,
        chat: &Chat,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<String> {
        let message_id = (self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1).to_string();
        self.record(
            chat.id,
            Sent::Keyboard {
                chat_id: chat.id,
                message_id: message_id.clone(),
                text: text.to_string(),
                keyboard: keyboard.clone(),
            },
        )?;
        Ok(message_id)
    }

    async fn edit_keyboard(
        &self,
        chat: &Chat,
        message_id: &str,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<()> {
        self.record(
            chat.id,
            Sent::Edit {
                chat_id: chat.id,
                message_id: message_id.to_string(),
                text: text.to_string(),
                keyboard: keyboard.clone(),
            },
        )
    }
}
