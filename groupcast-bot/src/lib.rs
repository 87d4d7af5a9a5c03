//! # groupcast bot application
//!
//! Operator-only broadcast bot: the operator picks destination groups on an inline keyboard, submits
//! one piece of content, and the bot sends it to every selected group and reports how many sends
//! succeeded. Wires groupcast-chain handlers over the groupcast-telegram transport.

pub mod cli;
pub mod config;
pub mod content;
pub mod dispatcher;
pub mod handlers;
pub mod registry;
pub mod runner;
pub mod session;
pub mod views;

pub use cli::{describe_config, load_config, Cli, Commands};
pub use config::{BaseConfig, BotConfig, BroadcastConfig};
pub use content::{BroadcastContent, Outbound};
pub use dispatcher::{BroadcastDispatcher, BroadcastReport, DeliveryOutcome};
pub use handlers::{AuthHandler, BroadcastHandler, Command, LoggingHandler};
pub use registry::{Group, GroupRegistry};
pub use runner::{build_handler_chain, run_bot};
pub use session::{PanelRef, Session, SessionState, SessionStore};
pub use views::{CallbackAction, REFUSAL_TEXT};
