/// Errors returned by [`Store`](crate::Store) implementations.
///
/// A record that is simply not found is never an error; lookups return
/// `None` or an empty collection instead.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("multiple open issues found for channel {channel_id:?} and correlation ID {correlation_id:?}")]
    MultipleOpenIssues {
        channel_id: String,
        correlation_id: String,
    },

    #[error("source and target channel IDs are the same")]
    SameChannel,

    #[error("failed to serialize {entity}: {source}")]
    Serialization {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl DbError {
    /// Wrap a serialization failure for the named entity kind.
    pub fn serialization(entity: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| Self::Serialization { entity, source }
    }
}

/// Fail with [`DbError::Required`] when `value` is empty.
pub(crate) fn require(name: &'static str, value: &str) -> Result<(), DbError> {
    if value.is_empty() {
        return Err(DbError::Required(name));
    }
    Ok(())
}
