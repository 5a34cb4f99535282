//! The alert aggregate: normalization, validation and identity.
//!
//! An [`Alert`] arrives from an untrusted submitter. [`Alert::clean`]
//! normalizes it in place (trimming, casing, truncation, ordering) and never
//! fails. [`Alert::validate`] then reports the first violated constraint in a
//! fixed order. Only a cleaned and validated alert should be persisted,
//! deduplicated or rendered.

use std::sync::LazyLock;

use chrono::{TimeDelta, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use crate::checks::MAX_SLACK_CHANNEL_ID_LENGTH;

use crate::checks;
use crate::error::{invalid, CoreError};
use crate::escalation::{clean_escalations, validate_escalations, Escalation};
use crate::field::Field;
use crate::hashing::hash_parts;
use crate::severity::AlertSeverity;
use crate::text;
use crate::types::{format_rfc3339_nano, Timestamp};
use crate::webhook::{validate_webhooks, Webhook};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MAX_ROUTE_KEY_LENGTH: usize = 1000;
pub const MAX_HEADER_LENGTH: usize = 130;
pub const MAX_TEXT_LENGTH: usize = 10_000;
pub const MAX_FALLBACK_TEXT_LENGTH: usize = 150;
pub const MAX_USERNAME_LENGTH: usize = 100;
pub const MAX_AUTHOR_LENGTH: usize = 100;
pub const MAX_HOST_LENGTH: usize = 100;
pub const MAX_FOOTER_LENGTH: usize = 300;
pub const MAX_CORRELATION_ID_LENGTH: usize = 1000;
pub const MAX_IGNORE_IF_TEXT_CONTAINS_LENGTH: usize = 1000;
pub const MAX_FIELD_COUNT: usize = 20;

/// Upper bound for `iconEmoji`, colons included.
pub const MAX_ICON_EMOJI_LENGTH: usize = 50;

pub const MIN_AUTO_RESOLVE_SECONDS: i64 = 30;

/// Roughly two years.
pub const MAX_AUTO_RESOLVE_SECONDS: i64 = 63_113_904;

/// Timestamps older than this are replaced with the current time.
const MAX_TIMESTAMP_AGE_DAYS: i64 = 7;

static ICON_EMOJI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:[^:\s]+:$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Alert
// ---------------------------------------------------------------------------

/// An externally submitted alert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Alert {
    /// Target channel ID or name. Required when `route_key` is empty.
    pub slack_channel_id: String,
    /// Resolved to a channel by routing rules. Required when
    /// `slack_channel_id` is empty.
    pub route_key: String,
    /// Groups related alerts into one issue.
    pub correlation_id: String,
    pub timestamp: Timestamp,
    pub header: String,
    pub header_when_resolved: String,
    pub text: String,
    pub text_when_resolved: String,
    /// Plain-text notification summary.
    pub fallback_text: String,
    pub severity: AlertSeverity,
    #[serde(rename = "type")]
    pub alert_type: String,
    pub username: String,
    pub author: String,
    pub host: String,
    pub footer: String,
    pub icon_emoji: String,
    pub link: String,
    pub archiving_delay_seconds: i64,
    pub notification_delay_seconds: i64,
    /// Only meaningful when `issue_follow_up_enabled` is set.
    pub auto_resolve_seconds: i64,
    pub issue_follow_up_enabled: bool,
    pub ignore_if_text_contains: Vec<String>,
    pub fields: Vec<Field>,
    pub webhooks: Vec<Webhook>,
    pub escalation: Vec<Escalation>,
}

impl Alert {
    /// A blank alert with `severity` and the current time.
    pub fn new(severity: AlertSeverity) -> Self {
        Self {
            severity,
            timestamp: Utc::now(),
            ..Default::default()
        }
    }

    pub fn panic() -> Self {
        Self::new(AlertSeverity::Panic)
    }

    pub fn error() -> Self {
        Self::new(AlertSeverity::Error)
    }

    pub fn warning() -> Self {
        Self::new(AlertSeverity::Warning)
    }

    pub fn resolved() -> Self {
        Self::new(AlertSeverity::Resolved)
    }

    pub fn info() -> Self {
        Self::new(AlertSeverity::Info)
    }

    /// Normalize the alert in place. Safe to call repeatedly.
    pub fn clean(&mut self) {
        let now = Utc::now();
        if self.timestamp < now - TimeDelta::days(MAX_TIMESTAMP_AGE_DAYS) {
            self.timestamp = now;
        }

        text::trim_lower(&mut self.alert_type);
        text::trim_upper(&mut self.slack_channel_id);
        text::trim_lower(&mut self.route_key);

        text::single_line(&mut self.header);
        text::truncate(&mut self.header, MAX_HEADER_LENGTH);
        text::single_line(&mut self.header_when_resolved);
        text::truncate(&mut self.header_when_resolved, MAX_HEADER_LENGTH);

        text::trim(&mut self.text);
        text::truncate(&mut self.text, MAX_TEXT_LENGTH);
        text::trim(&mut self.text_when_resolved);
        text::truncate(&mut self.text_when_resolved, MAX_TEXT_LENGTH);

        text::single_line(&mut self.fallback_text);
        text::strip_status_placeholder(&mut self.fallback_text);
        text::trim(&mut self.fallback_text);
        text::truncate(&mut self.fallback_text, MAX_FALLBACK_TEXT_LENGTH);

        text::trim_lower(&mut self.icon_emoji);
        text::trim(&mut self.correlation_id);
        text::trim(&mut self.link);

        text::trim(&mut self.username);
        text::truncate(&mut self.username, MAX_USERNAME_LENGTH);
        text::trim(&mut self.author);
        text::truncate(&mut self.author, MAX_AUTHOR_LENGTH);
        text::trim(&mut self.host);
        text::truncate(&mut self.host, MAX_HOST_LENGTH);
        text::trim(&mut self.footer);
        text::truncate(&mut self.footer, MAX_FOOTER_LENGTH);

        self.severity = AlertSeverity::normalize(self.severity.as_str());

        self.archiving_delay_seconds = self.archiving_delay_seconds.max(0);
        self.notification_delay_seconds = self.notification_delay_seconds.max(0);

        for field in &mut self.fields {
            field.clean();
        }
        for webhook in &mut self.webhooks {
            webhook.clean();
        }
        clean_escalations(&mut self.escalation);
    }

    /// Report the first violated constraint, if any. Never mutates.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.validate_slack_channel_id_and_route_key()?;

        if self.header.is_empty() && self.text.is_empty() {
            return invalid!("header and text cannot both be empty");
        }

        self.validate_icon_emoji()?;

        if !self.link.is_empty() {
            checks::absolute_url("link", &self.link)?;
        }

        checks::one_of(
            "severity",
            self.severity.as_str(),
            self.severity.is_valid(),
            AlertSeverity::valid_values(),
        )?;

        checks::max_length("correlationId", &self.correlation_id, MAX_CORRELATION_ID_LENGTH)?;

        if self.issue_follow_up_enabled
            && !(MIN_AUTO_RESOLVE_SECONDS..=MAX_AUTO_RESOLVE_SECONDS)
                .contains(&self.auto_resolve_seconds)
        {
            return invalid!(
                "autoResolveSeconds must be between {MIN_AUTO_RESOLVE_SECONDS} and \
                 {MAX_AUTO_RESOLVE_SECONDS} (got {})",
                self.auto_resolve_seconds
            );
        }

        for (i, ignore) in self.ignore_if_text_contains.iter().enumerate() {
            checks::max_length(
                &format!("ignoreIfTextContains[{i}]"),
                ignore,
                MAX_IGNORE_IF_TEXT_CONTAINS_LENGTH,
            )?;
        }

        if self.fields.len() > MAX_FIELD_COUNT {
            return invalid!("too many fields (max {MAX_FIELD_COUNT})");
        }

        validate_webhooks(&self.webhooks)?;
        validate_escalations(&self.escalation)
    }

    /// Check the routing pair on its own: at least one must be set and each
    /// must be well formed.
    pub fn validate_slack_channel_id_and_route_key(&self) -> Result<(), CoreError> {
        if self.slack_channel_id.is_empty() && self.route_key.is_empty() {
            return invalid!("slackChannelId is required when routeKey is empty");
        }

        if !self.slack_channel_id.is_empty() {
            checks::max_length(
                "slackChannelId",
                &self.slack_channel_id,
                MAX_SLACK_CHANNEL_ID_LENGTH,
            )?;
            if !checks::is_valid_channel(&self.slack_channel_id) {
                return invalid!(
                    "slackChannelId '{}' is not a valid channel ID or channel name",
                    self.slack_channel_id
                );
            }
        }

        checks::max_length("routeKey", &self.route_key, MAX_ROUTE_KEY_LENGTH)
    }

    fn validate_icon_emoji(&self) -> Result<(), CoreError> {
        if self.icon_emoji.is_empty() {
            return Ok(());
        }
        checks::max_length("iconEmoji", &self.icon_emoji, MAX_ICON_EMOJI_LENGTH)?;
        if !ICON_EMOJI_RE.is_match(&self.icon_emoji) {
            return invalid!(
                "iconEmoji '{}' is not valid (expected format :emoji:)",
                self.icon_emoji
            );
        }
        Ok(())
    }

    /// Identity used to drop duplicate submissions of the same alert.
    pub fn dedup_id(&self) -> String {
        let timestamp = format_rfc3339_nano(&self.timestamp);
        hash_parts(&[
            "alert",
            self.slack_channel_id.as_str(),
            self.route_key.as_str(),
            self.correlation_id.as_str(),
            timestamp.as_str(),
            self.header.as_str(),
            self.text.as_str(),
        ])
    }

    /// Storage key for the alert record.
    ///
    /// Covers every rendered text field, so re-submitting an identical alert
    /// upserts the same record while any visible change yields a new one.
    pub fn unique_id(&self) -> String {
        let timestamp = format_rfc3339_nano(&self.timestamp);
        hash_parts(&[
            "alert",
            self.slack_channel_id.as_str(),
            self.route_key.as_str(),
            self.correlation_id.as_str(),
            timestamp.as_str(),
            self.severity.as_str(),
            self.header.as_str(),
            self.text.as_str(),
            self.header_when_resolved.as_str(),
            self.text_when_resolved.as_str(),
            self.fallback_text.as_str(),
        ])
    }
}

/// Validate an alert that may be missing altogether.
pub fn validate_alert(alert: Option<&Alert>) -> Result<(), CoreError> {
    match alert {
        Some(alert) => alert.validate(),
        None => Err(CoreError::Missing("alert")),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webhook::{WebhookButtonStyle, WebhookPlainTextInput};
    use assert_matches::assert_matches;
    use rand::Rng;

    const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

    fn rand_string(n: usize) -> String {
        let mut rng = rand::rng();
        (0..n)
            .map(|_| LETTERS[rng.random_range(0..LETTERS.len())] as char)
            .collect()
    }

    /// Smallest alert that passes validation once cleaned.
    fn minimal() -> Alert {
        Alert {
            header: "a".to_string(),
            route_key: "b".to_string(),
            ..Default::default()
        }
    }

    fn cleaned(mut alert: Alert) -> Alert {
        alert.clean();
        alert
    }

    fn error_of(alert: Alert) -> String {
        cleaned(alert).validate().unwrap_err().to_string()
    }

    fn assert_recent(ts: &Timestamp) {
        assert!((Utc::now() - *ts).num_seconds().abs() <= 1);
    }

    // -- constructors ---------------------------------------------------------

    #[test]
    fn constructors_set_severity_and_timestamp() {
        let cases = [
            (Alert::panic(), AlertSeverity::Panic),
            (Alert::error(), AlertSeverity::Error),
            (Alert::warning(), AlertSeverity::Warning),
            (Alert::resolved(), AlertSeverity::Resolved),
            (Alert::info(), AlertSeverity::Info),
        ];
        for (alert, severity) in cases {
            assert_eq!(alert.severity, severity);
            assert_recent(&alert.timestamp);
        }
    }

    // -- identity -------------------------------------------------------------

    #[test]
    fn dedup_id_hashes_identity_fields() {
        let timestamp = Utc::now();
        let alert = Alert {
            slack_channel_id: "C12345678".to_string(),
            route_key: "foo".to_string(),
            correlation_id: "bar".to_string(),
            timestamp,
            header: "header".to_string(),
            text: "text".to_string(),
            ..Default::default()
        };
        let formatted = format_rfc3339_nano(&timestamp);
        let expected = hash_parts(&[
            "alert",
            "C12345678",
            "foo",
            "bar",
            formatted.as_str(),
            "header",
            "text",
        ]);
        assert_eq!(alert.dedup_id(), expected);
        assert_eq!(alert.dedup_id(), alert.clone().dedup_id());
    }

    #[test]
    fn dedup_id_is_sensitive_to_each_input() {
        let base = Alert {
            slack_channel_id: "C12345678".to_string(),
            correlation_id: "corr".to_string(),
            header: "header".to_string(),
            text: "text".to_string(),
            ..Alert::error()
        };
        let id = base.dedup_id();

        let mut other = base.clone();
        other.correlation_id = "other".to_string();
        assert_ne!(other.dedup_id(), id);

        let mut other = base.clone();
        other.timestamp += TimeDelta::nanoseconds(1);
        assert_ne!(other.dedup_id(), id);

        let mut other = base.clone();
        other.text = "changed".to_string();
        assert_ne!(other.dedup_id(), id);

        let mut other = base.clone();
        other.slack_channel_id = "C87654321".to_string();
        assert_ne!(other.dedup_id(), id);

        let mut other = base.clone();
        other.route_key = "route".to_string();
        assert_ne!(other.dedup_id(), id);

        let mut other = base.clone();
        other.header = "changed".to_string();
        assert_ne!(other.dedup_id(), id);

        let mut other = base.clone();
        other.footer = "not part of the identity".to_string();
        assert_eq!(other.dedup_id(), id);
    }

    #[test]
    fn unique_id_tracks_rendered_text() {
        let base = Alert {
            route_key: "foo".to_string(),
            header: "header".to_string(),
            ..Alert::error()
        };
        let mut other = base.clone();
        other.text_when_resolved = "done".to_string();
        assert_eq!(other.dedup_id(), base.dedup_id());
        assert_ne!(other.unique_id(), base.unique_id());
        assert_ne!(base.unique_id(), base.dedup_id());
    }

    // -- clean ----------------------------------------------------------------

    #[test]
    fn recent_timestamp_is_kept() {
        let ts = Utc::now() - TimeDelta::days(7) + TimeDelta::seconds(10);
        let alert = cleaned(Alert {
            timestamp: ts,
            ..Default::default()
        });
        assert_eq!(alert.timestamp, ts);
    }

    #[test]
    fn stale_or_missing_timestamp_is_replaced() {
        let ts = Utc::now() - TimeDelta::days(7) - TimeDelta::seconds(1);
        let alert = cleaned(Alert {
            timestamp: ts,
            ..Default::default()
        });
        assert_recent(&alert.timestamp);

        assert_recent(&cleaned(Alert::default()).timestamp);
    }

    #[test]
    fn routing_and_type_casing() {
        let alert = cleaned(Alert {
            alert_type: "  FOO  ".to_string(),
            slack_channel_id: "  c12345678  ".to_string(),
            route_key: "  FOO  ".to_string(),
            ..Default::default()
        });
        assert_eq!(alert.alert_type, "foo");
        assert_eq!(alert.slack_channel_id, "C12345678");
        assert_eq!(alert.route_key, "foo");
    }

    #[test]
    fn header_and_text_whitespace() {
        let alert = cleaned(Alert {
            header: "  Foo\nbar  ".to_string(),
            header_when_resolved: "  Hei\nresolved  ".to_string(),
            text: "  Foo\nbar  ".to_string(),
            text_when_resolved: "  Hei\nresolved  ".to_string(),
            ..Default::default()
        });
        assert_eq!(alert.header, "Foo bar");
        assert_eq!(alert.header_when_resolved, "Hei resolved");
        assert_eq!(alert.text, "Foo\nbar");
        assert_eq!(alert.text_when_resolved, "Hei\nresolved");
    }

    #[test]
    fn fallback_text_is_simplified() {
        let alert = cleaned(Alert {
            fallback_text: "  Foo\nbar :status: ".to_string(),
            ..Default::default()
        });
        assert_eq!(alert.fallback_text, "Foo bar");
    }

    #[test]
    fn plain_fields_are_trimmed() {
        let alert = cleaned(Alert {
            correlation_id: "  FOO  ".to_string(),
            username: "  FOO  ".to_string(),
            author: "  FOO  ".to_string(),
            host: "  FOO  ".to_string(),
            footer: "  FOO  ".to_string(),
            icon_emoji: "  :Foo:  ".to_string(),
            ..Default::default()
        });
        assert_eq!(alert.correlation_id, "FOO");
        assert_eq!(alert.username, "FOO");
        assert_eq!(alert.author, "FOO");
        assert_eq!(alert.host, "FOO");
        assert_eq!(alert.footer, "FOO");
        assert_eq!(alert.icon_emoji, ":foo:");
    }

    #[test]
    fn severity_normalization() {
        for (raw, expected) in [
            ("ERROR", AlertSeverity::Error),
            ("", AlertSeverity::Error),
            ("critical", AlertSeverity::Error),
            (" Panic ", AlertSeverity::Panic),
        ] {
            let alert = cleaned(Alert {
                severity: AlertSeverity::parse(raw),
                ..Default::default()
            });
            assert_eq!(alert.severity, expected, "raw severity {raw:?}");
        }

        let alert = cleaned(Alert {
            severity: AlertSeverity::parse("Foo"),
            ..Default::default()
        });
        assert_eq!(alert.severity, AlertSeverity::parse("foo"));
    }

    #[test]
    fn negative_delays_are_zeroed() {
        let alert = cleaned(Alert {
            archiving_delay_seconds: -1,
            notification_delay_seconds: -1,
            ..Default::default()
        });
        assert_eq!(alert.archiving_delay_seconds, 0);
        assert_eq!(alert.notification_delay_seconds, 0);
    }

    #[test]
    fn long_values_are_truncated() {
        let fallback = rand_string(151);
        let header = rand_string(131);
        let header_resolved = rand_string(131);
        let text_value = rand_string(10_001);
        let text_resolved = format!("{}```", rand_string(10_001));
        let author = rand_string(101);
        let username = rand_string(101);
        let host = rand_string(101);
        let footer = rand_string(301);

        let alert = cleaned(Alert {
            fallback_text: fallback.clone(),
            header: header.clone(),
            header_when_resolved: header_resolved.clone(),
            text: text_value.clone(),
            text_when_resolved: text_resolved.clone(),
            author: author.clone(),
            username: username.clone(),
            host: host.clone(),
            footer: footer.clone(),
            ..Default::default()
        });

        assert_eq!(alert.fallback_text, format!("{}...", &fallback[..147]));
        assert_eq!(alert.header, format!("{}...", &header[..127]));
        assert_eq!(
            alert.header_when_resolved,
            format!("{}...", &header_resolved[..127])
        );
        assert_eq!(alert.text, format!("{}...", &text_value[..9997]));
        assert_eq!(
            alert.text_when_resolved,
            format!("{}...```", &text_resolved[..9994])
        );
        assert_eq!(alert.author, format!("{}...", &author[..97]));
        assert_eq!(alert.username, format!("{}...", &username[..97]));
        assert_eq!(alert.host, format!("{}...", &host[..97]));
        assert_eq!(alert.footer, format!("{}...", &footer[..297]));
    }

    #[test]
    fn field_text_is_truncated() {
        let title = rand_string(31);
        let value = rand_string(201);
        let alert = cleaned(Alert {
            fields: vec![Field::new(title.clone(), value.clone())],
            ..Default::default()
        });
        assert_eq!(alert.fields[0].title, format!("{}...", &title[..27]));
        assert_eq!(alert.fields[0].value, format!("{}...", &value[..197]));
    }

    #[test]
    fn webhook_text_is_trimmed() {
        let mut webhook = Webhook::new("\tfoo  ", "  http://foo.bar  ", "  press me  ");
        webhook.confirmation_text = "  some text  ".to_string();
        webhook.button_style = Some(WebhookButtonStyle::parse("default"));
        webhook
            .plain_text_input
            .push(WebhookPlainTextInput::new("  foo  ", "  bar  "));

        let alert = cleaned(Alert {
            webhooks: vec![webhook],
            ..Default::default()
        });
        let webhook = &alert.webhooks[0];
        assert_eq!(webhook.id, "foo");
        assert_eq!(webhook.url, "http://foo.bar");
        assert_eq!(webhook.confirmation_text, "some text");
        assert_eq!(webhook.button_text, "press me");
        assert_eq!(webhook.button_style, None);
        assert_eq!(webhook.plain_text_input[0].id, "foo");
        assert_eq!(webhook.plain_text_input[0].description, "bar");
    }

    #[test]
    fn escalation_is_sorted_and_normalized() {
        let mut late = Escalation::new(60, AlertSeverity::Panic);
        late.move_to_channel = "  c12345678  ".to_string();
        late.slack_mentions = vec!["  <@foo>  ".to_string()];

        let alert = cleaned(Alert {
            escalation: vec![late, Escalation::new(30, AlertSeverity::Error)],
            ..Default::default()
        });
        assert_eq!(alert.escalation[0].delay_seconds, 30);
        assert_eq!(alert.escalation[1].delay_seconds, 60);
        assert_eq!(alert.escalation[1].move_to_channel, "C12345678");
        assert_eq!(alert.escalation[1].slack_mentions, vec!["<@foo>"]);
    }

    #[test]
    fn clean_is_idempotent() {
        let mut webhook = Webhook::new(" hook ", " https://example.com/x ", " Go ");
        webhook.button_style = Some(WebhookButtonStyle::parse("default"));

        let mut once = Alert {
            slack_channel_id: " c123abc456 ".to_string(),
            route_key: " Route ".to_string(),
            header: format!("  {}\n{}  ", rand_string(100), rand_string(100)),
            text: format!("{}```", rand_string(10_050)),
            fallback_text: format!(" ::status:status: {} ", rand_string(200)),
            severity: AlertSeverity::parse(" CRITICAL "),
            username: rand_string(150),
            footer: format!(" {} ", rand_string(400)),
            archiving_delay_seconds: -5,
            fields: vec![Field::new(rand_string(40), rand_string(250))],
            webhooks: vec![webhook],
            escalation: vec![
                Escalation::new(90, AlertSeverity::Panic),
                Escalation::new(30, AlertSeverity::Error),
            ],
            ..Default::default()
        };
        once.clean();
        let mut twice = once.clone();
        twice.clean();
        assert_eq!(twice, once);
    }

    // -- validate -------------------------------------------------------------

    #[test]
    fn missing_alert_is_rejected() {
        assert_matches!(validate_alert(None), Err(CoreError::Missing("alert")));
        assert_eq!(validate_alert(None).unwrap_err().to_string(), "alert is nil");
    }

    #[test]
    fn minimal_alert_is_valid() {
        let alert = cleaned(Alert {
            slack_channel_id: "C12345678".to_string(),
            header: "foo".to_string(),
            ..Default::default()
        });
        assert!(validate_alert(Some(&alert)).is_ok());
    }

    #[test]
    fn channel_or_route_key_is_required() {
        let err = error_of(Alert {
            header: "foo".to_string(),
            ..Default::default()
        });
        assert!(err.contains("slackChannelId"));
    }

    #[test]
    fn routing_formats() {
        let check = |alert: Alert| cleaned(alert).validate_slack_channel_id_and_route_key();
        let channel = |id: &str| Alert {
            slack_channel_id: id.to_string(),
            ..Default::default()
        };

        for id in ["abcdefghi", "ABab129cf", "abcdefghi9238yr", "12345678", "foo-something"] {
            assert!(check(channel(id)).is_ok(), "{id} should be accepted");
        }
        assert!(check(channel("")).is_err());
        assert!(check(channel("sdkjsdf asdfasdf")).is_err());
        assert!(check(channel(&rand_string(MAX_SLACK_CHANNEL_ID_LENGTH + 1))).is_err());

        let route = |key: String| Alert {
            route_key: key,
            ..Default::default()
        };
        assert!(check(route("abcdefghi".to_string())).is_ok());
        let err = check(route(rand_string(MAX_ROUTE_KEY_LENGTH + 1))).unwrap_err();
        assert!(err.to_string().contains("routeKey"));
    }

    #[test]
    fn header_or_text_is_required() {
        let err = error_of(Alert {
            slack_channel_id: "C12345678".to_string(),
            ..Default::default()
        });
        assert!(err.contains("header and text"));

        let text_only = Alert {
            route_key: "b".to_string(),
            text: "body".to_string(),
            ..Default::default()
        };
        assert!(cleaned(text_only).validate().is_ok());
    }

    #[test]
    fn icon_emoji_format() {
        let with_emoji = |emoji: String| Alert {
            icon_emoji: emoji,
            ..minimal()
        };
        assert!(cleaned(with_emoji(":foo:".to_string())).validate().is_ok());
        for bad in [":foo:bar:", "foo", "foo:"] {
            assert!(error_of(with_emoji(bad.to_string())).contains("iconEmoji"), "{bad}");
        }
        let long = format!(":{}:", rand_string(MAX_ICON_EMOJI_LENGTH + 1));
        assert!(error_of(with_emoji(long)).contains("iconEmoji"));
    }

    #[test]
    fn link_must_be_absolute() {
        let with_link = |link: &str| Alert {
            link: link.to_string(),
            ..minimal()
        };
        assert!(cleaned(minimal()).validate().is_ok());
        assert!(cleaned(with_link("http://foo.bar?foo=bar#sfd")).validate().is_ok());
        for bad in ["foo", "/foo"] {
            assert!(error_of(with_link(bad)).contains("link is not a valid absolute URL"));
        }
    }

    #[test]
    fn severity_must_be_known() {
        let alert = Alert {
            severity: AlertSeverity::Error,
            ..minimal()
        };
        assert!(cleaned(alert).validate().is_ok());

        let err = error_of(Alert {
            severity: AlertSeverity::parse("foo"),
            ..minimal()
        });
        assert!(err.contains("severity 'foo' is not valid"));
    }

    #[test]
    fn correlation_id_length() {
        let with_id = |id: String| Alert {
            correlation_id: id,
            ..minimal()
        };
        assert!(cleaned(with_id("foo".to_string())).validate().is_ok());
        let err = error_of(with_id(rand_string(MAX_CORRELATION_ID_LENGTH + 1)));
        assert!(err.contains("correlationId"));
    }

    #[test]
    fn auto_resolve_bounds_apply_with_follow_up() {
        let with = |enabled: bool, seconds: i64| Alert {
            issue_follow_up_enabled: enabled,
            auto_resolve_seconds: seconds,
            ..minimal()
        };
        assert!(cleaned(with(true, MIN_AUTO_RESOLVE_SECONDS)).validate().is_ok());
        assert!(cleaned(with(true, MAX_AUTO_RESOLVE_SECONDS)).validate().is_ok());
        assert!(cleaned(with(false, -1)).validate().is_ok());
        for seconds in [MIN_AUTO_RESOLVE_SECONDS - 1, -1, MAX_AUTO_RESOLVE_SECONDS + 1] {
            assert!(error_of(with(true, seconds)).contains("autoResolveSeconds"));
        }
    }

    #[test]
    fn ignore_if_text_contains_length() {
        let with = |values: Vec<String>| Alert {
            ignore_if_text_contains: values,
            ..minimal()
        };
        assert!(cleaned(with(vec![])).validate().is_ok());
        assert!(cleaned(with(vec!["foo".into(), "bar".into()])).validate().is_ok());
        assert!(cleaned(with(vec![rand_string(MAX_IGNORE_IF_TEXT_CONTAINS_LENGTH)]))
            .validate()
            .is_ok());
        let err = error_of(with(vec![
            "foo".into(),
            rand_string(MAX_IGNORE_IF_TEXT_CONTAINS_LENGTH + 1),
        ]));
        assert!(err.contains("ignoreIfTextContains[1]"));
    }

    #[test]
    fn field_count() {
        let alert = Alert {
            fields: vec![Field::new("foo", "bar"); MAX_FIELD_COUNT + 1],
            ..minimal()
        };
        assert!(error_of(alert).contains("too many fields"));
    }

    #[test]
    fn duplicate_webhook_ids_report_the_later_one() {
        let alert = Alert {
            webhooks: vec![
                Webhook::new("foo", "http://foo.bar", "press me"),
                Webhook::new("foo", "http://foo.bar", "press me"),
            ],
            ..minimal()
        };
        assert!(error_of(alert).contains("webhook[1].id must be unique"));
    }

    #[test]
    fn escalation_errors_surface_through_alert() {
        let alert = Alert {
            escalation: vec![
                Escalation::new(30, AlertSeverity::Error),
                Escalation::new(59, AlertSeverity::Panic),
            ],
            ..minimal()
        };
        assert!(error_of(alert)
            .contains("escalation[1].delaySeconds '59' is too small compared to previous escalation"));
    }

    #[test]
    fn first_violation_wins() {
        let alert = Alert {
            slack_channel_id: "C12345678".to_string(),
            severity: AlertSeverity::parse("foo"),
            ..Default::default()
        };
        let err = error_of(alert);
        assert!(err.contains("header and text"));
        assert!(!err.contains("severity"));
    }

    #[test]
    fn validate_does_not_mutate() {
        let alert = cleaned(Alert {
            header: " untrimmed ".to_string(),
            ..minimal()
        });
        let before = alert.clone();
        let _ = alert.validate();
        assert_eq!(alert, before);
    }

    // -- serde ----------------------------------------------------------------

    #[test]
    fn deserializes_camel_case_payload() {
        let alert: Alert = serde_json::from_value(serde_json::json!({
            "slackChannelId": "c12345678",
            "correlationId": "abc",
            "header": "Disk full",
            "severity": "CRITICAL",
            "type": "Infra",
            "issueFollowUpEnabled": true,
            "autoResolveSeconds": 3600,
            "webhooks": [{
                "id": "ack",
                "url": "https://example.com/ack",
                "buttonText": "Ack",
                "buttonStyle": ""
            }],
            "escalation": [{ "delaySeconds": 300, "severity": "panic" }]
        }))
        .unwrap();

        assert_eq!(alert.slack_channel_id, "c12345678");
        assert_eq!(alert.alert_type, "Infra");
        assert_eq!(alert.webhooks[0].button_style, None);

        let alert = cleaned(alert);
        assert_eq!(alert.severity, AlertSeverity::Error);
        assert!(alert.validate().is_ok());

        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["type"], "infra");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["slackChannelId"], "C12345678");
    }
}
