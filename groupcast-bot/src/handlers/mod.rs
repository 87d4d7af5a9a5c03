//! Handler implementations: logging, operator authorization, and the broadcast workflow.

mod broadcast_handler;
mod commands;
mod logging_auth;

pub use broadcast_handler::BroadcastHandler;
pub use commands::Command;
pub use logging_auth::{AuthHandler, LoggingHandler};
