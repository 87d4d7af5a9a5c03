//! Operator-facing texts, the selection keyboard and callback data.

use crate::registry::GroupRegistry;
use crate::session::Session;
use groupcast_core::{HandlerError, Keyboard, KeyboardButton};

pub const REFUSAL_TEXT: &str = "Sorry, you're not authorized to use this bot.";

const SELECTED_MARK: &str = "✅";
const UNSELECTED_MARK: &str = "⬜";

const TOGGLE_PREFIX: &str = "toggle:";
const SEND_SELECTED: &str = "send:selected";
const SEND_ALL: &str = "send:all";

/// What an inline button asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    Toggle(usize),
    SendSelected,
    SendAll,
}

impl CallbackAction {
    pub fn parse(data: &str) -> Result<Self, HandlerError> {
        match data {
            SEND_SELECTED => Ok(CallbackAction::SendSelected),
            SEND_ALL => Ok(CallbackAction::SendAll),
            _ => data
                .strip_prefix(TOGGLE_PREFIX)
                .and_then(|index| index.parse().ok())
                .map(CallbackAction::Toggle)
                .ok_or_else(|| HandlerError::InvalidCallback(data.to_string())),
        }
    }

    pub fn encode(&self) -> String {
        match self {
            CallbackAction::Toggle(index) => format!("{}{}", TOGGLE_PREFIX, index),
            CallbackAction::SendSelected => SEND_SELECTED.to_string(),
            CallbackAction::SendAll => SEND_ALL.to_string(),
        }
    }
}

/// One toggle button per group (marked when selected), then the two send buttons.
pub fn selection_keyboard(registry: &GroupRegistry, session: &Session) -> Keyboard {
    let mut keyboard = Keyboard::new();
    for (index, group) in registry.iter() {
        let mark = if session.is_selected(index) {
            SELECTED_MARK
        } else {
            UNSELECTED_MARK
        };
        keyboard = keyboard.row(vec![KeyboardButton::new(
            format!("{} {}", mark, group.name),
            CallbackAction::Toggle(index).encode(),
        )]);
    }
    keyboard.row(vec![
        KeyboardButton::new("📢 Send to selected", CallbackAction::SendSelected.encode()),
        KeyboardButton::new("📣 Send to all", CallbackAction::SendAll.encode()),
    ])
}

pub fn panel_text(registry: &GroupRegistry, session: &Session) -> String {
    let content = match session.content() {
        Some(c) => c.summary(),
        None => "none yet, send a message to set it".to_string(),
    };
    format!(
        "Select target groups ({}/{} selected).\nContent: {}",
        session.selection().len(),
        registry.len(),
        content
    )
}

pub fn content_saved_text(summary: &str) -> String {
    format!("Content saved: {}. Pick groups and press Send.", summary)
}

pub fn unsupported_text(kind: &str) -> String {
    format!(
        "Unsupported content type: {}. Send text, a photo, video, document, sticker or animation.",
        kind
    )
}

/// Corrective prompt for a refused dispatch or /broadcast.
pub fn precondition_text(error: &HandlerError) -> String {
    match error {
        HandlerError::EmptySelection => {
            "No groups selected. Use /start and pick at least one group.".to_string()
        }
        HandlerError::NoContent => {
            "Nothing to send yet. Send the text or media to broadcast first.".to_string()
        }
        other => other.to_string(),
    }
}

pub fn awaiting_content_text(targets: usize, has_content: bool) -> String {
    if has_content {
        format!(
            "Content is ready for {} group(s). Press \"Send to selected\" or send new content to replace it.",
            targets
        )
    } else {
        format!("Send the content to broadcast to {} group(s).", targets)
    }
}

pub const CANCELLED_TEXT: &str = "Broadcast cancelled. Use /start to begin again.";
pub const UNKNOWN_GROUP_TEXT: &str = "That group is not in the list any more. Use /start to refresh.";
pub const UNKNOWN_ACTION_TEXT: &str = "Unknown action. Use /start to get a fresh panel.";
pub const PANEL_CLOSED_TEXT: &str = "Broadcast done. Use /start for a new one.";
