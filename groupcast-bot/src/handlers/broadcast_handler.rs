//! The broadcast workflow: commands, content submission, selection toggles and dispatch.

use async_trait::async_trait;
use groupcast_core::{
    Bot, CallbackQuery, Chat, Handler, HandlerError, HandlerResponse, Keyboard, Message, Result,
    Update,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use super::commands::Command;
use crate::content::BroadcastContent;
use crate::dispatcher::BroadcastDispatcher;
use crate::registry::{Group, GroupRegistry};
use crate::session::{PanelRef, Session, SessionStore};
use crate::views::{self, CallbackAction};

/// Which groups a send button targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Targets {
    Selected,
    All,
}

/// Drives one operator session per user id. Must run behind [`super::AuthHandler`].
pub struct BroadcastHandler {
    bot: Arc<dyn Bot>,
    registry: Arc<GroupRegistry>,
    dispatcher: BroadcastDispatcher,
    sessions: SessionStore,
    bot_username: Arc<RwLock<Option<String>>>,
}

impl BroadcastHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        registry: Arc<GroupRegistry>,
        dispatcher: BroadcastDispatcher,
        bot_username: Arc<RwLock<Option<String>>>,
    ) -> Self {
        Self {
            bot,
            registry,
            dispatcher,
            sessions: SessionStore::new(),
            bot_username,
        }
    }

    /// Shared session store, e.g. for inspecting state in tests.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    async fn reply(&self, chat: &Chat, text: String) -> Result<HandlerResponse> {
        self.bot.send_message(chat, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }

    /// Edits the selection panel in place, or sends a new one when there is none or the edit fails.
    async fn refresh_panel(&self, session: &mut Session, chat: &Chat) -> Result<()> {
        let text = views::panel_text(&self.registry, session);
        let keyboard = views::selection_keyboard(&self.registry, session);

        if let Some(panel) = session.panel().cloned() {
            match self
                .bot
                .edit_keyboard(&panel.chat, &panel.message_id, &text, &keyboard)
                .await
            {
                Ok(()) => return Ok(()),
                Err(e) => warn!(error = %e, "Panel edit failed, sending a new panel"),
            }
        }

        let message_id = self.bot.send_keyboard(chat, &text, &keyboard).await?;
        session.set_panel(PanelRef {
            chat: chat.clone(),
            message_id,
        });
        Ok(())
    }

    async fn on_command(&self, message: &Message) -> Result<HandlerResponse> {
        let username = self.bot_username.read().await.clone().unwrap_or_default();
        let Some(command) = Command::parse_text(&message.content, &username) else {
            info!(text = %message.content, "Unknown command");
            return self.reply(&message.chat, Command::help_text()).await;
        };

        let mut session = self.sessions.lock(message.user.id).await;
        match command {
            Command::Start => {
                session.start();
                info!(user_id = message.user.id, "Broadcast session started");
                let text = views::panel_text(&self.registry, &session);
                let keyboard = views::selection_keyboard(&self.registry, &session);
                let message_id = self
                    .bot
                    .send_keyboard(&message.chat, &text, &keyboard)
                    .await?;
                session.set_panel(PanelRef {
                    chat: message.chat.clone(),
                    message_id,
                });
                Ok(HandlerResponse::Reply(text))
            }
            Command::Broadcast => {
                let selected = session.selection().len();
                if selected == 0 {
                    let text = views::precondition_text(&HandlerError::EmptySelection);
                    return self.reply(&message.chat, text).await;
                }
                let text = views::awaiting_content_text(selected, session.content().is_some());
                self.reply(&message.chat, text).await
            }
            Command::Cancel => {
                session.reset();
                info!(user_id = message.user.id, "Broadcast session cancelled");
                self.reply(&message.chat, views::CANCELLED_TEXT.to_string())
                    .await
            }
            Command::Help => self.reply(&message.chat, Command::help_text()).await,
        }
    }

    async fn on_content(&self, message: &Message) -> Result<HandlerResponse> {
        let content = match BroadcastContent::classify(message) {
            Ok(content) => content,
            Err(HandlerError::UnsupportedContent(kind)) => {
                info!(kind = %kind, "Rejected unsupported content");
                return self.reply(&message.chat, views::unsupported_text(&kind)).await;
            }
            Err(e) => return Err(e.into()),
        };

        let mut session = self.sessions.lock(message.user.id).await;
        let summary = content.summary();
        let replaced = session.set_content(content);
        info!(
            user_id = message.user.id,
            kind = session.content().map(|c| c.kind()).unwrap_or_default(),
            replaced = replaced.is_some(),
            "Content stored"
        );

        let text = views::content_saved_text(&summary);
        self.bot.send_message(&message.chat, &text).await?;
        self.refresh_panel(&mut session, &message.chat).await?;
        Ok(HandlerResponse::Reply(text))
    }

    async fn on_callback(&self, query: &CallbackQuery) -> Result<HandlerResponse> {
        let chat = query
            .chat
            .clone()
            .unwrap_or_else(|| Chat::with_id(query.user.id));

        let action = match CallbackAction::parse(&query.data) {
            Ok(action) => action,
            Err(e) => {
                warn!(error = %e, "Ignoring callback");
                return self.reply(&chat, views::UNKNOWN_ACTION_TEXT.to_string()).await;
            }
        };

        let mut session = self.sessions.lock(query.user.id).await;
        if session.panel().is_none() {
            if let Some(message_id) = query.message_id.clone() {
                session.set_panel(PanelRef {
                    chat: chat.clone(),
                    message_id,
                });
            }
        }

        match action {
            CallbackAction::Toggle(index) => {
                match session.toggle(index, self.registry.len()) {
                    Ok(selected) => {
                        info!(index = index, selected = selected, "Group toggled");
                        self.refresh_panel(&mut session, &chat).await?;
                        Ok(HandlerResponse::Stop)
                    }
                    Err(e) => {
                        warn!(error = %e, "Toggle rejected");
                        self.reply(&chat, views::UNKNOWN_GROUP_TEXT.to_string())
                            .await
                    }
                }
            }
            CallbackAction::SendSelected => self.send(&mut session, &chat, Targets::Selected).await,
            CallbackAction::SendAll => self.send(&mut session, &chat, Targets::All).await,
        }
    }

    /// Checks preconditions, fans out, returns the session to Idle, then reports.
    #[instrument(skip(self, session, chat))]
    async fn send(
        &self,
        session: &mut Session,
        chat: &Chat,
        targets: Targets,
    ) -> Result<HandlerResponse> {
        let prepared: std::result::Result<(Vec<Group>, BroadcastContent), HandlerError> =
            match targets {
                Targets::Selected => session.ready().map(|(indices, content)| {
                    (self.registry.resolve(&indices), content.clone())
                }),
                Targets::All => session
                    .content()
                    .cloned()
                    .map(|content| (self.registry.all().to_vec(), content))
                    .ok_or(HandlerError::NoContent),
            };

        let (groups, content) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                info!(reason = %e, "Dispatch refused");
                return self.reply(chat, views::precondition_text(&e)).await;
            }
        };

        info!(
            targets = groups.len(),
            kind = content.kind(),
            "Dispatching broadcast"
        );
        let report = self.dispatcher.dispatch(&groups, &content).await;

        // Back to Idle before any operator-facing call, since those may fail.
        let panel = session.panel().cloned();
        session.reset();

        if let Some(panel) = panel {
            if let Err(e) = self
                .bot
                .edit_keyboard(
                    &panel.chat,
                    &panel.message_id,
                    views::PANEL_CLOSED_TEXT,
                    &Keyboard::new(),
                )
                .await
            {
                warn!(error = %e, "Failed to close selection panel");
            }
        }

        let text = report.render();
        self.bot.send_message(chat, &text).await?;

        Ok(HandlerResponse::Reply(text))
    }
}

#[async_trait]
impl Handler for BroadcastHandler {
    #[instrument(skip(self, update))]
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        match update {
            Update::Message(message) if message.is_command() => self.on_command(message).await,
            Update::Message(message) => self.on_content(message).await,
            Update::Callback(query) => self.on_callback(query).await,
        }
    }
}
