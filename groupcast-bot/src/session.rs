//! Broadcast session: selected groups, buffered content and the selection panel of one operator.

use crate::content::BroadcastContent;
use groupcast_core::{Chat, HandlerError};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Where a session is in the broadcast workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing started, or the last broadcast finished.
    Idle,
    /// Groups and content are being chosen.
    Selecting,
    /// At least one group selected and content present.
    ReadyToBroadcast,
}

/// Message that carries the selection keyboard, so it can be edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRef {
    pub chat: Chat,
    pub message_id: String,
}

/// State of one broadcast session.
///
/// Selection holds registry indices and is kept sorted, so dispatch order follows registry order.
#[derive(Debug, Default)]
pub struct Session {
    active: bool,
    selection: BTreeSet<usize>,
    content: Option<BroadcastContent>,
    panel: Option<PanelRef>,
}

impl Session {
    /// Clears selection and content and enters Selecting.
    pub fn start(&mut self) {
        *self = Session {
            active: true,
            ..Session::default()
        };
    }

    /// Drops everything and returns to Idle.
    pub fn reset(&mut self) {
        *self = Session::default();
    }

    pub fn state(&self) -> SessionState {
        if !self.active {
            SessionState::Idle
        } else if !self.selection.is_empty() && self.content.is_some() {
            SessionState::ReadyToBroadcast
        } else {
            SessionState::Selecting
        }
    }

    /// Flips membership of `index`; returns whether the group is selected afterwards.
    pub fn toggle(&mut self, index: usize, registry_len: usize) -> Result<bool, HandlerError> {
        if index >= registry_len {
            return Err(HandlerError::InvalidGroupIndex(index));
        }
        self.active = true;
        if self.selection.remove(&index) {
            Ok(false)
        } else {
            self.selection.insert(index);
            Ok(true)
        }
    }

    /// Stores content, replacing any previous one, which is returned. Selection is untouched.
    pub fn set_content(&mut self, content: BroadcastContent) -> Option<BroadcastContent> {
        self.active = true;
        self.content.replace(content)
    }

    pub fn content(&self) -> Option<&BroadcastContent> {
        self.content.as_ref()
    }

    pub fn selection(&self) -> &BTreeSet<usize> {
        &self.selection
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.contains(&index)
    }

    /// Selected indices and content, or the missing precondition. Selection is checked first.
    pub fn ready(&self) -> Result<(Vec<usize>, &BroadcastContent), HandlerError> {
        if self.selection.is_empty() {
            return Err(HandlerError::EmptySelection);
        }
        let content = self.content.as_ref().ok_or(HandlerError::NoContent)?;
        Ok((self.selection.iter().copied().collect(), content))
    }

    pub fn panel(&self) -> Option<&PanelRef> {
        self.panel.as_ref()
    }

    pub fn set_panel(&mut self, panel: PanelRef) {
        self.panel = Some(panel);
    }
}

/// Sessions keyed by operator id. Each session has its own async lock, held for the whole handling of one update.
#[derive(Debug, Default, Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<i64, Arc<AsyncMutex<Session>>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the session of `user_id`, creating an Idle one on first use.
    pub async fn lock(&self, user_id: i64) -> OwnedMutexGuard<Session> {
        let session = {
            let mut sessions = self
                .sessions
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            sessions.entry(user_id).or_default().clone()
        };
        session.lock_owned().await
    }
}
