use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::{BoxFuture, FutureExt};
use slackmgr_core::types::Timestamp;
use uuid::Uuid;

use crate::error::QueueError;

/// Callback invoked to acknowledge or extend a received item.
pub type ItemCallback = Arc<dyn Fn() -> BoxFuture<'static, Result<(), QueueError>> + Send + Sync>;

/// A message handed to a consumer by [`FifoQueue::receive`](crate::FifoQueue::receive).
#[derive(Clone)]
pub struct FifoQueueItem {
    pub message_id: String,
    /// Items with the same group ID are delivered in send order.
    pub group_id: String,
    pub dedup_id: String,
    pub receive_timestamp: Timestamp,
    /// Zero when the queue has no visibility timeout.
    pub visibility_timeout: Duration,
    pub body: String,
    ack: ItemCallback,
    extend_visibility: Option<ItemCallback>,
}

impl FifoQueueItem {
    /// A freshly identified item with a no-op acknowledgement and no
    /// visibility extension.
    pub fn new(
        group_id: impl Into<String>,
        dedup_id: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            message_id: Uuid::new_v4().to_string(),
            group_id: group_id.into(),
            dedup_id: dedup_id.into(),
            receive_timestamp: Utc::now(),
            visibility_timeout: Duration::ZERO,
            body: body.into(),
            ack: Arc::new(|| async { Ok::<(), QueueError>(()) }.boxed()),
            extend_visibility: None,
        }
    }

    /// Replace the acknowledgement callback.
    pub fn with_ack(mut self, ack: ItemCallback) -> Self {
        self.ack = ack;
        self
    }

    /// Attach a visibility extension callback and the timeout it extends.
    pub fn with_extend_visibility(mut self, timeout: Duration, extend: ItemCallback) -> Self {
        self.visibility_timeout = timeout;
        self.extend_visibility = Some(extend);
        self
    }

    /// Acknowledge the item so it is not redelivered.
    pub async fn ack(&self) -> Result<(), QueueError> {
        (self.ack)().await
    }

    pub fn can_extend_visibility(&self) -> bool {
        self.extend_visibility.is_some()
    }

    /// Push the visibility deadline out by another `visibility_timeout`.
    pub async fn extend_visibility(&self) -> Result<(), QueueError> {
        match &self.extend_visibility {
            Some(extend) => extend().await,
            None => Err(QueueError::Unsupported("visibility extension")),
        }
    }
}

impl fmt::Debug for FifoQueueItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FifoQueueItem")
            .field("message_id", &self.message_id)
            .field("group_id", &self.group_id)
            .field("dedup_id", &self.dedup_id)
            .field("receive_timestamp", &self.receive_timestamp)
            .field("visibility_timeout", &self.visibility_timeout)
            .field("body", &self.body)
            .field("can_extend_visibility", &self.can_extend_visibility())
            .finish()
    }
}
