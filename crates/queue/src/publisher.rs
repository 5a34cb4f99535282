//! Normalizes, validates and enqueues submitted alerts.

use std::sync::Arc;

use slackmgr_core::{Alert, CoreError};
use tokio_util::sync::CancellationToken;

use crate::error::QueueError;
use crate::FifoQueue;

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("invalid alert: {0}")]
    Invalid(#[from] CoreError),

    #[error("failed to serialize alert: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Turns submitted alerts into queue messages.
///
/// Alerts for the same channel share a group so they are processed in
/// order; alerts addressed only by route key are grouped by that key.
pub struct AlertPublisher<Q> {
    queue: Arc<Q>,
}

impl<Q: FifoQueue> AlertPublisher<Q> {
    pub fn new(queue: Arc<Q>) -> Self {
        Self { queue }
    }

    /// Clean, validate and enqueue `alert`, returning its deduplication ID.
    pub async fn publish(
        &self,
        cancel: &CancellationToken,
        mut alert: Alert,
    ) -> Result<String, PublishError> {
        alert.clean();
        if let Err(e) = alert.validate() {
            tracing::warn!(
                route_key = %alert.route_key,
                slack_channel_id = %alert.slack_channel_id,
                error = %e,
                "Rejected invalid alert"
            );
            return Err(e.into());
        }

        let body = serde_json::to_string(&alert)?;
        let dedup_id = alert.dedup_id();
        let group_id = queue_group(&alert);

        self.queue.send(cancel, group_id, &dedup_id, &body).await?;

        tracing::debug!(group_id, dedup_id = %dedup_id, severity = %alert.severity, "Published alert");
        Ok(dedup_id)
    }
}

/// The queue group for an alert: its channel, or its route key when the
/// channel is resolved later.
fn queue_group(alert: &Alert) -> &str {
    if alert.slack_channel_id.is_empty() {
        &alert.route_key
    } else {
        &alert.slack_channel_id
    }
}
