//! Interactive webhook buttons attached to an alert.
//!
//! A [`Webhook`] is rendered as a button. Pressing it optionally opens a
//! dialog built from its plain-text and checkbox inputs, and then posts the
//! payload plus the collected input values to `url`.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Deserializer, Serialize};

use crate::checks;
use crate::error::{invalid, CoreError};
use crate::text;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MAX_WEBHOOK_COUNT: usize = 5;
pub const MAX_WEBHOOK_URL_LENGTH: usize = 1000;
pub const MAX_WEBHOOK_BUTTON_TEXT_LENGTH: usize = 25;
pub const MAX_WEBHOOK_CONFIRMATION_TEXT_LENGTH: usize = 1000;
pub const MAX_WEBHOOK_PAYLOAD_COUNT: usize = 50;

pub const MAX_WEBHOOK_INPUT_COUNT: usize = 10;
pub const MAX_WEBHOOK_INPUT_ID_LENGTH: usize = 200;
pub const MAX_WEBHOOK_INPUT_DESCRIPTION_LENGTH: usize = 200;
pub const MAX_WEBHOOK_INPUT_LABEL_LENGTH: usize = 200;

/// Upper bound for a plain-text input's `minLength` and `maxLength`.
pub const MAX_PLAIN_TEXT_INPUT_LENGTH: i64 = 3000;

pub const MAX_CHECKBOX_OPTION_COUNT: usize = 5;
pub const MAX_CHECKBOX_OPTION_TEXT_LENGTH: usize = 50;

/// Button style token meaning "use the provider default".
const DEFAULT_BUTTON_STYLE: &str = "default";

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

define_token_enum! {
    /// Visual style of a webhook button. No value means the provider default.
    WebhookButtonStyle {
        Primary = "primary",
        Danger = "danger",
    }
}

define_token_enum! {
    /// Who may press a webhook button.
    WebhookAccessLevel {
        GlobalAdmins = "global_admins",
        ChannelAdmins = "channel_admins",
        ChannelMembers = "channel_members",
    }
}

define_token_enum! {
    /// When a webhook button is shown relative to the issue state.
    WebhookDisplayMode {
        Always = "always",
        OpenIssue = "open_issue",
        ResolvedIssue = "resolved_issue",
    }
}

/// Deserialize an optional token where an empty string means "not set".
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|token| !token.is_empty()).map(T::from))
}

// ---------------------------------------------------------------------------
// Webhook
// ---------------------------------------------------------------------------

/// An interactive action descriptor owned by an alert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    /// Unique within the parent alert.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub button_text: String,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub button_style: Option<WebhookButtonStyle>,
    #[serde(default)]
    pub confirmation_text: String,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub access_level: Option<WebhookAccessLevel>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_mode: Option<WebhookDisplayMode>,
    /// Opaque key/value data posted back to `url`.
    #[serde(default)]
    pub payload: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub plain_text_input: Vec<WebhookPlainTextInput>,
    #[serde(default)]
    pub checkbox_input: Vec<WebhookCheckboxInput>,
}

impl Webhook {
    pub fn new(
        id: impl Into<String>,
        url: impl Into<String>,
        button_text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            button_text: button_text.into(),
            ..Default::default()
        }
    }

    /// Trim text fields, unset empty enum tokens and clean inputs.
    ///
    /// The `default` button style is unset as well.
    pub fn clean(&mut self) {
        text::trim(&mut self.id);
        text::trim(&mut self.url);
        text::trim(&mut self.confirmation_text);
        text::trim(&mut self.button_text);

        if matches!(
            &self.button_style,
            Some(WebhookButtonStyle::Other(token)) if token.is_empty() || token == DEFAULT_BUTTON_STYLE
        ) {
            self.button_style = None;
        }
        if matches!(&self.access_level, Some(WebhookAccessLevel::Other(token)) if token.is_empty()) {
            self.access_level = None;
        }
        if matches!(&self.display_mode, Some(WebhookDisplayMode::Other(token)) if token.is_empty()) {
            self.display_mode = None;
        }

        for input in &mut self.plain_text_input {
            input.clean();
        }
        for input in &mut self.checkbox_input {
            input.clean();
        }
    }

    /// Validate this webhook as entry `index` of its alert.
    ///
    /// ID uniqueness is checked by [`validate_webhooks`].
    fn validate(&self, index: usize) -> Result<(), CoreError> {
        let path = format!("webhook[{index}]");

        checks::required(&format!("{path}.url"), &self.url)?;
        checks::max_length(&format!("{path}.url"), &self.url, MAX_WEBHOOK_URL_LENGTH)?;
        checks::absolute_url(&format!("{path}.url"), &self.url)?;

        checks::required(&format!("{path}.buttonText"), &self.button_text)?;
        checks::max_length(
            &format!("{path}.buttonText"),
            &self.button_text,
            MAX_WEBHOOK_BUTTON_TEXT_LENGTH,
        )?;
        checks::max_length(
            &format!("{path}.confirmationText"),
            &self.confirmation_text,
            MAX_WEBHOOK_CONFIRMATION_TEXT_LENGTH,
        )?;

        if let Some(style) = &self.button_style {
            checks::one_of(
                &format!("{path}.buttonStyle"),
                style.as_str(),
                style.is_valid(),
                WebhookButtonStyle::valid_values(),
            )?;
        }
        if let Some(level) = &self.access_level {
            checks::one_of(
                &format!("{path}.accessLevel"),
                level.as_str(),
                level.is_valid(),
                WebhookAccessLevel::valid_values(),
            )?;
        }
        if let Some(mode) = &self.display_mode {
            checks::one_of(
                &format!("{path}.displayMode"),
                mode.as_str(),
                mode.is_valid(),
                WebhookDisplayMode::valid_values(),
            )?;
        }

        checks::max_items(
            &format!("{path}.payload"),
            self.payload.len(),
            MAX_WEBHOOK_PAYLOAD_COUNT,
        )?;

        checks::max_items(
            &format!("{path}.plainTextInput"),
            self.plain_text_input.len(),
            MAX_WEBHOOK_INPUT_COUNT,
        )?;
        let mut seen = HashSet::new();
        for (i, input) in self.plain_text_input.iter().enumerate() {
            let input_path = format!("{path}.plainTextInput[{i}]");
            checks::required(&format!("{input_path}.id"), &input.id)?;
            checks::unique(&format!("{input_path}.id"), &input.id, &mut seen)?;
            input.validate(&input_path)?;
        }

        checks::max_items(
            &format!("{path}.checkboxInput"),
            self.checkbox_input.len(),
            MAX_WEBHOOK_INPUT_COUNT,
        )?;
        let mut seen = HashSet::new();
        for (i, input) in self.checkbox_input.iter().enumerate() {
            let input_path = format!("{path}.checkboxInput[{i}]");
            checks::required(&format!("{input_path}.id"), &input.id)?;
            checks::unique(&format!("{input_path}.id"), &input.id, &mut seen)?;
            input.validate(&input_path)?;
        }

        Ok(())
    }
}

/// Validate the webhook list of an alert, stopping at the first problem.
///
/// IDs are required and unique; the later of two duplicates is reported.
pub fn validate_webhooks(webhooks: &[Webhook]) -> Result<(), CoreError> {
    if webhooks.len() > MAX_WEBHOOK_COUNT {
        return invalid!("too many webhooks (max {MAX_WEBHOOK_COUNT})");
    }

    let mut seen = HashSet::new();
    for (i, webhook) in webhooks.iter().enumerate() {
        let id_path = format!("webhook[{i}].id");
        checks::required(&id_path, &webhook.id)?;
        checks::unique(&id_path, &webhook.id, &mut seen)?;
        webhook.validate(i)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Plain-text input
// ---------------------------------------------------------------------------

/// A free-text field shown in the webhook dialog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPlainTextInput {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
    /// Zero means no lower bound.
    #[serde(default)]
    pub min_length: i64,
    /// Zero means no upper bound. The `minLength` and `initialValue` bounds
    /// are only checked against a set maximum, so an input may declare a
    /// minimum alone.
    #[serde(default)]
    pub max_length: i64,
    #[serde(default)]
    pub multiline: bool,
    #[serde(default)]
    pub initial_value: String,
}

impl WebhookPlainTextInput {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn clean(&mut self) {
        text::trim(&mut self.id);
        text::trim(&mut self.description);
    }

    fn validate(&self, path: &str) -> Result<(), CoreError> {
        checks::max_length(&format!("{path}.id"), &self.id, MAX_WEBHOOK_INPUT_ID_LENGTH)?;
        checks::max_length(
            &format!("{path}.description"),
            &self.description,
            MAX_WEBHOOK_INPUT_DESCRIPTION_LENGTH,
        )?;

        for (name, value) in [("minLength", self.min_length), ("maxLength", self.max_length)] {
            if value < 0 {
                return invalid!("{path}.{name} must be >=0");
            }
            if value > MAX_PLAIN_TEXT_INPUT_LENGTH {
                return invalid!("{path}.{name} must be <={MAX_PLAIN_TEXT_INPUT_LENGTH}");
            }
        }

        if self.max_length > 0 {
            if self.max_length < self.min_length {
                return invalid!("{path}.maxLength cannot be smaller than minLength");
            }
            if text::char_len(&self.initial_value) as i64 > self.max_length {
                return invalid!("{path}.initialValue cannot be longer than maxLength");
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Checkbox input
// ---------------------------------------------------------------------------

/// A group of checkboxes shown in the webhook dialog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookCheckboxInput {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub options: Vec<WebhookCheckboxOption>,
}

impl WebhookCheckboxInput {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            options: Vec::new(),
        }
    }

    pub fn clean(&mut self) {
        text::trim(&mut self.id);
        text::trim(&mut self.label);
        for option in &mut self.options {
            option.clean();
        }
    }

    fn validate(&self, path: &str) -> Result<(), CoreError> {
        checks::max_length(&format!("{path}.id"), &self.id, MAX_WEBHOOK_INPUT_ID_LENGTH)?;
        checks::max_length(
            &format!("{path}.label"),
            &self.label,
            MAX_WEBHOOK_INPUT_LABEL_LENGTH,
        )?;
        checks::max_items(
            &format!("{path}.options"),
            self.options.len(),
            MAX_CHECKBOX_OPTION_COUNT,
        )?;

        let mut seen = HashSet::new();
        for (i, option) in self.options.iter().enumerate() {
            let option_path = format!("{path}.options[{i}]");
            checks::required(&format!("{option_path}.value"), &option.value)?;
            checks::unique(&format!("{option_path}.value"), &option.value, &mut seen)?;
            checks::max_length(
                &format!("{option_path}.text"),
                &option.text,
                MAX_CHECKBOX_OPTION_TEXT_LENGTH,
            )?;
        }

        Ok(())
    }
}

/// One checkbox within a [`WebhookCheckboxInput`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookCheckboxOption {
    /// Submitted when checked. Unique within the parent input.
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub selected: bool,
}

impl WebhookCheckboxOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            selected: false,
        }
    }

    pub fn clean(&mut self) {
        text::trim(&mut self.value);
        text::trim(&mut self.text);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
