//! # groupcast-core
//!
//! Core types and traits for the broadcast bot: [`Bot`], [`Handler`], [`Update`] with its message and
//! callback variants, inline [`Keyboard`], errors, and tracing initialization. Transport-agnostic; used by
//! groupcast-chain, groupcast-telegram and groupcast-bot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{GroupcastError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    Attachment, AttachmentKind, CallbackQuery, Chat, Handler, HandlerResponse, Keyboard,
    KeyboardButton, Message, ToCoreCallback, ToCoreMessage, ToCoreUser, Update,
    User,
};
