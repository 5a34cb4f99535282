//! Timed escalation steps attached to an alert.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::checks;
use crate::error::{invalid, CoreError};
use crate::severity::AlertSeverity;
use crate::text;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum delay before the first escalation fires.
pub const MIN_ESCALATION_DELAY_SECONDS: i64 = 30;

/// Minimum gap between two consecutive escalation steps.
pub const MIN_ESCALATION_DELAY_DIFF_SECONDS: i64 = 30;

pub const MAX_ESCALATION_MENTIONS: usize = 10;

/// Upper bound for a single mention, including the angle brackets.
pub const MAX_MENTION_LENGTH: usize = 50;

/// Severities an escalation step may raise an alert to.
const ESCALATION_SEVERITIES: &[&str] = &["panic", "error"];

/// User (`<@U123>`), user group (`<!subteam^S123>`) and broadcast mentions.
static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<(@|!subteam\^)[0-9A-Za-z]+>$|^<!(here|channel|everyone)>$")
        .expect("valid regex")
});

// ---------------------------------------------------------------------------
// Escalation
// ---------------------------------------------------------------------------

/// A step that raises severity, pings people or moves the issue after a delay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Escalation {
    #[serde(default)]
    pub delay_seconds: i64,
    #[serde(default)]
    pub severity: AlertSeverity,
    /// Channel ID or name the issue is moved to. Empty means stay put.
    #[serde(default)]
    pub move_to_channel: String,
    #[serde(default)]
    pub slack_mentions: Vec<String>,
}

impl Escalation {
    pub fn new(delay_seconds: i64, severity: AlertSeverity) -> Self {
        Self {
            delay_seconds,
            severity,
            ..Default::default()
        }
    }

    pub fn clean(&mut self) {
        text::trim_upper(&mut self.move_to_channel);
        for mention in &mut self.slack_mentions {
            text::trim(mention);
        }
    }
}

/// Stable-sort escalation steps by delay and clean each one.
pub fn clean_escalations(escalations: &mut [Escalation]) {
    escalations.sort_by_key(|e| e.delay_seconds);
    for escalation in escalations.iter_mut() {
        escalation.clean();
    }
}

/// Validate escalation steps in order, stopping at the first problem.
///
/// Steps are expected to be sorted already; see [`clean_escalations`].
pub fn validate_escalations(escalations: &[Escalation]) -> Result<(), CoreError> {
    let mut previous_delay: Option<i64> = None;

    for (i, escalation) in escalations.iter().enumerate() {
        let path = format!("escalation[{i}]");
        let delay = escalation.delay_seconds;

        match previous_delay {
            None if delay < MIN_ESCALATION_DELAY_SECONDS => {
                return invalid!(
                    "{path}.delaySeconds '{delay}' is too low (min {MIN_ESCALATION_DELAY_SECONDS})"
                );
            }
            Some(previous)
                if previous
                    .checked_add(MIN_ESCALATION_DELAY_DIFF_SECONDS)
                    .is_none_or(|min| delay < min) => {
                return invalid!(
                    "{path}.delaySeconds '{delay}' is too small compared to previous escalation \
                     (min diff {MIN_ESCALATION_DELAY_DIFF_SECONDS})"
                );
            }
            _ => {}
        }
        previous_delay = Some(delay);

        checks::one_of(
            &format!("{path}.severity"),
            escalation.severity.as_str(),
            escalation.severity.is_escalatable(),
            ESCALATION_SEVERITIES,
        )?;

        checks::max_items(
            &format!("{path}.slackMentions"),
            escalation.slack_mentions.len(),
            MAX_ESCALATION_MENTIONS,
        )?;
        for (j, mention) in escalation.slack_mentions.iter().enumerate() {
            if !is_valid_mention(mention) {
                return invalid!("{path}.slackMentions[{j}] is not valid");
            }
        }

        if !escalation.move_to_channel.is_empty()
            && !checks::is_valid_channel(&escalation.move_to_channel)
        {
            return invalid!("{path}.moveToChannel is not valid");
        }
    }

    Ok(())
}

/// Whether `value` is a well-formed mention within the length bound.
pub fn is_valid_mention(value: &str) -> bool {
    text::char_len(value) <= MAX_MENTION_LENGTH && MENTION_RE.is_match(value)
}
