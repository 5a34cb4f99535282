/// Errors produced by the alert engine.
///
/// Validation messages are shown verbatim to the alert submitter and name
/// the offending field path, e.g. `webhook[0].plainTextInput[1].id must be unique`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} is nil")]
    Missing(&'static str),
}

/// Shorthand for building a [`CoreError::Validation`] from a format string.
macro_rules! invalid {
    ($($arg:tt)*) => {
        Err($crate::error::CoreError::Validation(format!($($arg)*)))
    };
}

pub(crate) use invalid;
