//! The persistence contract used by the alert and issue processors.

use std::collections::HashMap;
use std::future::Future;

use serde_json::Value;
use slackmgr_core::Alert;

use crate::error::DbError;
use crate::models::channel_processing_state::ChannelProcessingState;
use crate::models::issue::{Issue, MoveMapping};

/// A stored issue: its unique ID and JSON body.
pub type IssueRecord = (String, Value);

/// Persistence for alerts, issues, move mappings and channel processing
/// state.
///
/// Lookups that find nothing return `None` or an empty collection. Errors
/// are reserved for missing required keys, ambiguous matches and
/// serialization failures.
pub trait Store: Send + Sync {
    /// Upsert an alert keyed by [`Alert::unique_id`].
    fn save_alert(&self, alert: &Alert) -> impl Future<Output = Result<(), DbError>> + Send;

    /// Upsert a single issue keyed by [`Issue::unique_id`].
    fn save_issue<I: Issue>(&self, issue: &I) -> impl Future<Output = Result<(), DbError>> + Send;

    /// Upsert several issues, stopping at the first failure.
    fn save_issues<I: Issue>(
        &self,
        issues: &[I],
    ) -> impl Future<Output = Result<(), DbError>> + Send;

    /// Re-home an existing issue. A no-op for unknown issues.
    fn move_issue<I: Issue>(
        &self,
        issue: &I,
        source_channel_id: &str,
        target_channel_id: &str,
    ) -> impl Future<Output = Result<(), DbError>> + Send;

    /// The single open issue in `channel_id` with `correlation_id`.
    fn find_open_issue_by_correlation_id(
        &self,
        channel_id: &str,
        correlation_id: &str,
    ) -> impl Future<Output = Result<Option<IssueRecord>, DbError>> + Send;

    /// The issue in `channel_id` currently represented by `post_id`.
    fn find_issue_by_slack_post_id(
        &self,
        channel_id: &str,
        post_id: &str,
    ) -> impl Future<Output = Result<Option<IssueRecord>, DbError>> + Send;

    /// Channels holding at least one open issue.
    fn find_active_channels(&self) -> impl Future<Output = Result<Vec<String>, DbError>> + Send;

    /// Open issues in `channel_id`, keyed by unique ID.
    fn load_open_issues_in_channel(
        &self,
        channel_id: &str,
    ) -> impl Future<Output = Result<HashMap<String, Value>, DbError>> + Send;

    /// Upsert a move mapping keyed by `(channel_id, correlation_id)`.
    fn save_move_mapping<M: MoveMapping>(
        &self,
        mapping: &M,
    ) -> impl Future<Output = Result<(), DbError>> + Send;

    fn find_move_mapping(
        &self,
        channel_id: &str,
        correlation_id: &str,
    ) -> impl Future<Output = Result<Option<Value>, DbError>> + Send;

    /// Remove a move mapping. A no-op when it does not exist.
    fn delete_move_mapping(
        &self,
        channel_id: &str,
        correlation_id: &str,
    ) -> impl Future<Output = Result<(), DbError>> + Send;

    fn save_channel_processing_state(
        &self,
        state: &ChannelProcessingState,
    ) -> impl Future<Output = Result<(), DbError>> + Send;

    fn find_channel_processing_state(
        &self,
        channel_id: &str,
    ) -> impl Future<Output = Result<Option<ChannelProcessingState>, DbError>> + Send;

    /// Remove every record. Intended for tests.
    fn drop_all_data(&self) -> impl Future<Output = Result<(), DbError>> + Send;
}
