//! Contracts for the records the store persists on behalf of the issue
//! processor. The store only needs their keys and a JSON body; the concrete
//! types live with the processor.

use serde_json::Value;

/// An issue groups related alerts posted to a single channel.
pub trait Issue: Send + Sync {
    /// Stable storage key.
    fn unique_id(&self) -> String;

    /// Channel the issue is currently posted in.
    fn channel_id(&self) -> String;

    fn correlation_id(&self) -> String;

    /// ID of the chat post currently representing the issue. May be empty.
    fn current_post_id(&self) -> String;

    fn is_open(&self) -> bool;

    /// Full JSON representation stored as the record body.
    fn to_json(&self) -> serde_json::Result<Value>;
}

/// Records that an issue with a given correlation ID was moved out of a
/// channel, so later alerts for it can follow.
pub trait MoveMapping: Send + Sync {
    /// Channel the issue was moved from.
    fn channel_id(&self) -> String;

    fn correlation_id(&self) -> String;

    fn to_json(&self) -> serde_json::Result<Value>;
}
