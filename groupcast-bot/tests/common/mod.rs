#![allow(dead_code)]

pub mod mock_bot;

use chrono::Utc;
use groupcast_bot::{build_handler_chain, BroadcastConfig, Group, GroupRegistry};
use groupcast_chain::HandlerChain;
use groupcast_core::{Attachment, AttachmentKind, CallbackQuery, Chat, Message, Update, User};
use mock_bot::MockBot;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const OPERATOR_ID: i64 = 42;
pub const GROUP_A: i64 = -100;
pub const GROUP_B: i64 = -200;
pub const GROUP_C: i64 = -300;

pub fn registry() -> GroupRegistry {
    GroupRegistry::new(vec![
        Group::new(GROUP_A, "A"),
        Group::new(GROUP_B, "B"),
        Group::new(GROUP_C, "C"),
    ])
    .unwrap()
}

pub fn settings(concurrency: usize) -> BroadcastConfig {
    BroadcastConfig::new(OPERATOR_ID, registry(), concurrency)
}

/// Chain wired exactly like the binary, over a recording bot.
pub fn chain_with_mock() -> (HandlerChain, Arc<MockBot>) {
    let bot = Arc::new(MockBot::new());
    let chain = build_handler_chain(&settings(1), bot.clone(), Arc::new(RwLock::new(None)));
    (chain, bot)
}

fn user(id: i64) -> User {
    User {
        id,
        username: Some(format!("user{}", id)),
        first_name: None,
        last_name: None,
    }
}

fn private_chat(id: i64) -> Chat {
    Chat {
        id,
        chat_type: "private".to_string(),
    }
}

fn message(
    user_id: i64,
    content: &str,
    command: bool,
    message_type: &str,
    attachment: Option<Attachment>,
    caption: Option<&str>,
) -> Update {
    Update::Message(Message {
        id: "1".to_string(),
        user: user(user_id),
        chat: private_chat(user_id),
        content: content.to_string(),
        message_type: message_type.to_string(),
        attachment,
        caption: caption.map(str::to_string),
        command,
        created_at: Utc::now(),
    })
}

pub fn text(user_id: i64, text: &str) -> Update {
    message(user_id, text, false, "text", None, None)
}

/// Text Telegram tagged with a leading bot_command entity.
pub fn command(user_id: i64, text: &str) -> Update {
    message(user_id, text, true, "text", None, None)
}

pub fn media(user_id: i64, kind: AttachmentKind, file_id: &str, caption: Option<&str>) -> Update {
    message(
        user_id,
        "",
        false,
        kind.as_str(),
        Some(Attachment {
            kind,
            file_id: file_id.to_string(),
        }),
        caption,
    )
}

/// A message kind with no broadcastable representation, e.g. "voice" or "poll".
pub fn unsupported(user_id: i64, message_type: &str) -> Update {
    message(user_id, "", false, message_type, None, None)
}

/// Button press on the panel message in the user's private chat.
pub fn press(user_id: i64, data: &str) -> Update {
    Update::Callback(CallbackQuery {
        id: format!("cb-{}", data),
        user: user(user_id),
        chat: Some(private_chat(user_id)),
        message_id: Some("1".to_string()),
        data: data.to_string(),
    })
}
