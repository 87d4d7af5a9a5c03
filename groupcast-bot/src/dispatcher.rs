//! Broadcast fan-out: one independent send per target group, outcomes aggregated into a report.

use crate::content::{BroadcastContent, Outbound};
use crate::registry::Group;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use groupcast_core::{Bot, Chat, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Result of the send to one group. `error` is None on success.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryOutcome {
    pub group: Group,
    pub error: Option<String>,
}

impl DeliveryOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcomes of one broadcast, in target order.
#[derive(Debug, Clone, Serialize)]
pub struct BroadcastReport {
    pub content_kind: &'static str,
    pub outcomes: Vec<DeliveryOutcome>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl BroadcastReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &DeliveryOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Report sent back to the operator.
    pub fn render(&self) -> String {
        let mut text = format!(
            "📊 Broadcast finished: {} succeeded, {} failed out of {}.",
            self.succeeded(),
            self.failed(),
            self.total()
        );
        for outcome in self.failures() {
            text.push_str(&format!(
                "\n❌ {}: {}",
                outcome.group.name,
                outcome.error.as_deref().unwrap_or("unknown error")
            ));
        }
        text
    }
}

/// Sends buffered content to groups through a [`Bot`].
///
/// `concurrency` sends are in flight at once (1 means strictly sequential). Outcomes keep target
/// order whatever the concurrency.
#[derive(Clone)]
pub struct BroadcastDispatcher {
    bot: Arc<dyn Bot>,
    concurrency: usize,
}

impl BroadcastDispatcher {
    pub fn new(bot: Arc<dyn Bot>, concurrency: usize) -> Self {
        Self {
            bot,
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Attempts one send per target. A failed send is logged and recorded; it never stops the others.
    #[instrument(skip(self, targets, content), fields(targets = targets.len(), kind = content.kind()))]
    pub async fn dispatch(&self, targets: &[Group], content: &BroadcastContent) -> BroadcastReport {
        let started_at = Utc::now();

        let outcomes: Vec<DeliveryOutcome> = stream::iter(targets.iter().cloned())
            .map(|group| async move {
                match self.send_to(&group, content).await {
                    Ok(()) => {
                        info!(group_id = group.id, group = %group.name, "Delivered");
                        DeliveryOutcome { group, error: None }
                    }
                    Err(e) => {
                        warn!(
                            group_id = group.id,
                            group = %group.name,
                            error = %e,
                            "Delivery failed"
                        );
                        DeliveryOutcome {
                            group,
                            error: Some(e.to_string()),
                        }
                    }
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let report = BroadcastReport {
            content_kind: content.kind(),
            outcomes,
            started_at,
            finished_at: Utc::now(),
        };
        info!(
            total = report.total(),
            succeeded = report.succeeded(),
            failed = report.failed(),
            "Broadcast finished"
        );
        report
    }

    async fn send_to(&self, group: &Group, content: &BroadcastContent) -> Result<()> {
        let chat = Chat::with_id(group.id);
        match content.outbound() {
            Outbound::Text(text) => self.bot.send_message(&chat, text).await,
            Outbound::Media {
                attachment,
                caption,
            } => self.bot.send_media(&chat, &attachment, caption).await,
        }
    }
}
