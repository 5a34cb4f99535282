//! Title/value pairs rendered as a compact table under the alert text.

use serde::{Deserialize, Serialize};

use crate::text;

/// Maximum length of a field title, including the ellipsis.
pub const MAX_FIELD_TITLE_LENGTH: usize = 30;

/// Maximum length of a field value, including the ellipsis.
pub const MAX_FIELD_VALUE_LENGTH: usize = 200;

/// A single title/value pair attached to an alert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub value: String,
}

impl Field {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }

    /// Trim and truncate title and value.
    pub fn clean(&mut self) {
        text::trim(&mut self.title);
        text::truncate(&mut self.title, MAX_FIELD_TITLE_LENGTH);
        text::trim(&mut self.value);
        text::truncate(&mut self.value, MAX_FIELD_VALUE_LENGTH);
    }
}
