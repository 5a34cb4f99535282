use std::time::Duration;

/// Errors returned by [`FifoQueue`](crate::FifoQueue) implementations and
/// queue item callbacks.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("timeout after {0:?} waiting for queue capacity")]
    Timeout(Duration),

    #[error("operation cancelled")]
    Cancelled,

    #[error("queue channel closed")]
    Closed,

    #[error("{0} is not supported by this queue")]
    Unsupported(&'static str),
}
