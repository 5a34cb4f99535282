use chrono::Utc;
use serde::{Deserialize, Serialize};
use slackmgr_core::types::Timestamp;

/// Bookkeeping for the periodic per-channel processing pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProcessingState {
    pub channel_id: String,
    pub created: Timestamp,
    pub last_processed: Timestamp,
}

impl ChannelProcessingState {
    /// A fresh state for `channel_id`, created and processed now.
    pub fn new(channel_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            channel_id: channel_id.into(),
            created: now,
            last_processed: now,
        }
    }

    /// Record a completed processing pass.
    pub fn mark_processed(&mut self) {
        self.last_processed = Utc::now();
    }
}
