//! In-memory [`Store`] for tests and local runs. Not for production use.

use std::collections::{BTreeSet, HashMap};

use serde_json::Value;
use slackmgr_core::Alert;
use tokio::sync::RwLock;

use crate::error::{require, DbError};
use crate::find_options::FindOptions;
use crate::models::channel_processing_state::ChannelProcessingState;
use crate::models::issue::{Issue, MoveMapping};
use crate::store::{IssueRecord, Store};

/// Indexed copy of a stored issue.
#[derive(Debug, Clone)]
struct IssueEntry {
    channel_id: String,
    correlation_id: String,
    post_id: String,
    is_open: bool,
    body: Value,
}

#[derive(Debug, Default)]
struct Tables {
    alerts: HashMap<String, Value>,
    issues: HashMap<String, IssueEntry>,
    /// Keyed by `(channel_id, correlation_id)`.
    move_mappings: HashMap<(String, String), Value>,
    channel_processing_states: HashMap<String, ChannelProcessingState>,
}

/// A [`Store`] holding everything in process memory behind a single
/// `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored body of the alert with `unique_id`, if any.
    pub async fn find_alert(&self, unique_id: &str) -> Option<Value> {
        self.tables.read().await.alerts.get(unique_id).cloned()
    }

    /// Issues whose body matches every filter in `options`, sorted by ID.
    pub async fn find_issues(&self, options: &FindOptions) -> Vec<IssueRecord> {
        let tables = self.tables.read().await;
        let mut found: Vec<IssueRecord> = tables
            .issues
            .iter()
            .filter(|(_, entry)| options.matches(&entry.body))
            .map(|(id, entry)| (id.clone(), entry.body.clone()))
            .collect();
        found.sort_by(|a, b| a.0.cmp(&b.0));
        found
    }
}

fn issue_entry<I: Issue>(issue: &I) -> Result<IssueEntry, DbError> {
    Ok(IssueEntry {
        channel_id: issue.channel_id(),
        correlation_id: issue.correlation_id(),
        post_id: issue.current_post_id(),
        is_open: issue.is_open(),
        body: issue.to_json().map_err(DbError::serialization("issue"))?,
    })
}

fn mapping_key(channel_id: &str, correlation_id: &str) -> (String, String) {
    (channel_id.to_string(), correlation_id.to_string())
}

impl Store for InMemoryStore {
    async fn save_alert(&self, alert: &Alert) -> Result<(), DbError> {
        let body = serde_json::to_value(alert).map_err(DbError::serialization("alert"))?;
        let id = alert.unique_id();

        tracing::debug!(alert_id = %id, "Saving alert");
        self.tables.write().await.alerts.insert(id, body);
        Ok(())
    }

    async fn save_issue<I: Issue>(&self, issue: &I) -> Result<(), DbError> {
        let entry = issue_entry(issue)?;
        let id = issue.unique_id();

        tracing::debug!(issue_id = %id, channel_id = %entry.channel_id, "Saving issue");
        self.tables.write().await.issues.insert(id, entry);
        Ok(())
    }

    async fn save_issues<I: Issue>(&self, issues: &[I]) -> Result<(), DbError> {
        for issue in issues {
            self.save_issue(issue).await?;
        }
        Ok(())
    }

    async fn move_issue<I: Issue>(
        &self,
        issue: &I,
        source_channel_id: &str,
        target_channel_id: &str,
    ) -> Result<(), DbError> {
        if source_channel_id == target_channel_id {
            return Err(DbError::SameChannel);
        }
        let entry = issue_entry(issue)?;
        let id = issue.unique_id();

        let mut tables = self.tables.write().await;
        let Some(record) = tables.issues.get_mut(&id) else {
            tracing::debug!(issue_id = %id, "Ignoring move of unknown issue");
            return Ok(());
        };

        record.channel_id = target_channel_id.to_string();
        record.post_id = entry.post_id;
        record.is_open = entry.is_open;
        record.body = entry.body;

        tracing::debug!(
            issue_id = %id,
            source_channel_id,
            target_channel_id,
            "Moved issue"
        );
        Ok(())
    }

    async fn find_open_issue_by_correlation_id(
        &self,
        channel_id: &str,
        correlation_id: &str,
    ) -> Result<Option<IssueRecord>, DbError> {
        require("channelID", channel_id)?;
        require("correlationID", correlation_id)?;

        let tables = self.tables.read().await;
        let mut found: Option<IssueRecord> = None;

        for (id, entry) in &tables.issues {
            if entry.is_open
                && entry.channel_id == channel_id
                && entry.correlation_id == correlation_id
            {
                if found.is_some() {
                    return Err(DbError::MultipleOpenIssues {
                        channel_id: channel_id.to_string(),
                        correlation_id: correlation_id.to_string(),
                    });
                }
                found = Some((id.clone(), entry.body.clone()));
            }
        }

        Ok(found)
    }

    async fn find_issue_by_slack_post_id(
        &self,
        channel_id: &str,
        post_id: &str,
    ) -> Result<Option<IssueRecord>, DbError> {
        require("channelID", channel_id)?;
        require("postID", post_id)?;

        let tables = self.tables.read().await;
        Ok(tables
            .issues
            .iter()
            .find(|(_, entry)| entry.channel_id == channel_id && entry.post_id == post_id)
            .map(|(id, entry)| (id.clone(), entry.body.clone())))
    }

    async fn find_active_channels(&self) -> Result<Vec<String>, DbError> {
        let tables = self.tables.read().await;
        let channels: BTreeSet<&str> = tables
            .issues
            .values()
            .filter(|entry| entry.is_open)
            .map(|entry| entry.channel_id.as_str())
            .collect();
        Ok(channels.into_iter().map(str::to_string).collect())
    }

    async fn load_open_issues_in_channel(
        &self,
        channel_id: &str,
    ) -> Result<HashMap<String, Value>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .issues
            .iter()
            .filter(|(_, entry)| entry.is_open && entry.channel_id == channel_id)
            .map(|(id, entry)| (id.clone(), entry.body.clone()))
            .collect())
    }

    async fn save_move_mapping<M: MoveMapping>(&self, mapping: &M) -> Result<(), DbError> {
        let body = mapping
            .to_json()
            .map_err(DbError::serialization("move mapping"))?;
        let key = mapping_key(&mapping.channel_id(), &mapping.correlation_id());

        tracing::debug!(channel_id = %key.0, correlation_id = %key.1, "Saving move mapping");
        self.tables.write().await.move_mappings.insert(key, body);
        Ok(())
    }

    async fn find_move_mapping(
        &self,
        channel_id: &str,
        correlation_id: &str,
    ) -> Result<Option<Value>, DbError> {
        require("channelID", channel_id)?;
        require("correlationID", correlation_id)?;

        let tables = self.tables.read().await;
        Ok(tables
            .move_mappings
            .get(&mapping_key(channel_id, correlation_id))
            .cloned())
    }

    async fn delete_move_mapping(
        &self,
        channel_id: &str,
        correlation_id: &str,
    ) -> Result<(), DbError> {
        self.tables
            .write()
            .await
            .move_mappings
            .remove(&mapping_key(channel_id, correlation_id));
        Ok(())
    }

    async fn save_channel_processing_state(
        &self,
        state: &ChannelProcessingState,
    ) -> Result<(), DbError> {
        self.tables
            .write()
            .await
            .channel_processing_states
            .insert(state.channel_id.clone(), state.clone());
        Ok(())
    }

    async fn find_channel_processing_state(
        &self,
        channel_id: &str,
    ) -> Result<Option<ChannelProcessingState>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.channel_processing_states.get(channel_id).cloned())
    }

    async fn drop_all_data(&self) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        *tables = Tables::default();
        tracing::info!("Dropped all in-memory data");
        Ok(())
    }
}
