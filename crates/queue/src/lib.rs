//! FIFO queue contract, an in-memory implementation, and the publisher that
//! turns submitted alerts into queue messages.

pub mod config;
pub mod error;
pub mod item;
pub mod memory;
pub mod publisher;

use std::future::Future;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub use config::{ConfigError, QueueConfig};
pub use error::QueueError;
pub use item::FifoQueueItem;
pub use memory::InMemoryFifoQueue;
pub use publisher::{AlertPublisher, PublishError};

/// Ordered message delivery keyed by group and deduplication IDs.
pub trait FifoQueue: Send + Sync {
    /// Enqueue `body`. Waits for capacity until the implementation's
    /// deadline or until `cancel` fires.
    fn send(
        &self,
        cancel: &CancellationToken,
        group_id: &str,
        dedup_id: &str,
        body: &str,
    ) -> impl Future<Output = Result<(), QueueError>> + Send;

    /// Forward items to `sink` in order until `cancel` fires.
    ///
    /// The sink is dropped, and therefore closed, when this returns.
    fn receive(
        &self,
        cancel: &CancellationToken,
        sink: mpsc::Sender<FifoQueueItem>,
    ) -> impl Future<Output = Result<(), QueueError>> + Send;
}
