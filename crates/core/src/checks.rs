//! Reusable field checks shared by the alert, webhook and escalation
//! validators. Each returns a [`CoreError::Validation`] naming `path`.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{invalid, CoreError};
use crate::text::char_len;

/// Upper bound for a channel ID or channel name.
pub const MAX_SLACK_CHANNEL_ID_LENGTH: usize = 80;

static CHANNEL_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-zA-Z]{9,15}$").expect("valid regex"));

static CHANNEL_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-zA-Z_\-]{1,80}$").expect("valid regex"));

/// Fail when `value` is empty.
pub(crate) fn required(path: &str, value: &str) -> Result<(), CoreError> {
    if value.is_empty() {
        return invalid!("{path} is required");
    }
    Ok(())
}

/// Fail when `value` is longer than `max` characters.
pub(crate) fn max_length(path: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if char_len(value) > max {
        return invalid!("{path} is too long (max {max} characters)");
    }
    Ok(())
}

/// Fail when a collection holds more than `max` items.
pub(crate) fn max_items(path: &str, count: usize, max: usize) -> Result<(), CoreError> {
    if count > max {
        return invalid!("{path} item count is too large (max {max})");
    }
    Ok(())
}

/// Record `value` in `seen`, failing when it was already present.
pub(crate) fn unique<'a>(
    path: &str,
    value: &'a str,
    seen: &mut HashSet<&'a str>,
) -> Result<(), CoreError> {
    if !seen.insert(value) {
        return invalid!("{path} must be unique");
    }
    Ok(())
}

/// Fail when `value` is not an absolute URL with a scheme and a host.
pub(crate) fn absolute_url(path: &str, value: &str) -> Result<(), CoreError> {
    if !is_absolute_url(value) {
        return invalid!("{path} is not a valid absolute URL");
    }
    Ok(())
}

/// Whether `value` parses as a URL with both a scheme and a host.
pub(crate) fn is_absolute_url(value: &str) -> bool {
    match url::Url::parse(value) {
        Ok(parsed) => parsed.has_host() && parsed.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}

/// Whether `value` is a plausible channel ID or channel name.
pub(crate) fn is_valid_channel(value: &str) -> bool {
    value.len() <= MAX_SLACK_CHANNEL_ID_LENGTH
        && (CHANNEL_ID_RE.is_match(value) || CHANNEL_NAME_RE.is_match(value))
}

/// Fail when an enumerated value is not one of `valid`.
pub(crate) fn one_of(
    path: &str,
    token: &str,
    is_valid: bool,
    valid: &[&str],
) -> Result<(), CoreError> {
    if !is_valid {
        return invalid!(
            "{path} '{token}' is not valid (must be one of: {})",
            valid.join(", ")
        );
    }
    Ok(())
}
