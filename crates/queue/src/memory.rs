//! Bounded in-process FIFO queue for tests and single-node deployments.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

use crate::config::QueueConfig;
use crate::error::QueueError;
use crate::item::FifoQueueItem;
use crate::FifoQueue;

/// A [`FifoQueue`] backed by a bounded `tokio::sync::mpsc` channel.
///
/// Delivery is strictly in send order across all groups. Items carry a
/// no-op acknowledgement and cannot have their visibility extended.
pub struct InMemoryFifoQueue {
    tx: mpsc::Sender<FifoQueueItem>,
    /// Single consumer at a time.
    rx: Mutex<mpsc::Receiver<FifoQueueItem>>,
    send_timeout: Duration,
}

impl InMemoryFifoQueue {
    /// Create a queue holding at most `capacity` undelivered items. A zero
    /// capacity is raised to one.
    pub fn new(capacity: usize, send_timeout: Duration) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        Self {
            tx,
            rx: Mutex::new(rx),
            send_timeout,
        }
    }

    pub fn from_config(config: &QueueConfig) -> Self {
        Self::new(config.capacity, config.send_timeout)
    }
}

impl FifoQueue for InMemoryFifoQueue {
    async fn send(
        &self,
        cancel: &CancellationToken,
        group_id: &str,
        dedup_id: &str,
        body: &str,
    ) -> Result<(), QueueError> {
        let item = FifoQueueItem::new(group_id, dedup_id, body);
        let message_id = item.message_id.clone();

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(QueueError::Cancelled),
            result = tokio::time::timeout(self.send_timeout, self.tx.send(item)) => match result {
                Ok(Ok(())) => {
                    tracing::debug!(%message_id, group_id, dedup_id, "Queued message");
                    Ok(())
                }
                Ok(Err(_)) => Err(QueueError::Closed),
                Err(_) => {
                    tracing::warn!(
                        group_id,
                        dedup_id,
                        timeout_ms = self.send_timeout.as_millis() as u64,
                        "Queue full, send timed out"
                    );
                    Err(QueueError::Timeout(self.send_timeout))
                }
            },
        }
    }

    async fn receive(
        &self,
        cancel: &CancellationToken,
        sink: mpsc::Sender<FifoQueueItem>,
    ) -> Result<(), QueueError> {
        let mut rx = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(QueueError::Cancelled),
            guard = self.rx.lock() => guard,
        };

        loop {
            let mut item = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!("FIFO queue receive loop cancelled");
                    return Err(QueueError::Cancelled);
                }
                next = rx.recv() => next.ok_or(QueueError::Closed)?,
            };
            item.receive_timestamp = Utc::now();

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!("FIFO queue receive loop cancelled while forwarding");
                    return Err(QueueError::Cancelled);
                }
                sent = sink.send(item) => {
                    if sent.is_err() {
                        tracing::warn!("FIFO queue sink dropped, stopping receive loop");
                        return Err(QueueError::Closed);
                    }
                }
            }
        }
    }
}
