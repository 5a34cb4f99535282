//! Field filters applied to stored issue bodies.

use std::collections::HashMap;

use serde_json::Value;

/// Top-level JSON field filters for issue lookups.
///
/// Built with [`with_field_equals`](FindOptions::with_field_equals) and
/// [`with_field_not_equals`](FindOptions::with_field_not_equals). Setting the
/// same field twice keeps the last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    field_equals: HashMap<String, Value>,
    field_not_equals: HashMap<String, Value>,
}

impl FindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to be present and equal to `value`.
    pub fn with_field_equals(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.field_equals.insert(field.into(), value.into());
        self
    }

    /// Require `field` to be absent or different from `value`.
    pub fn with_field_not_equals(
        mut self,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.field_not_equals.insert(field.into(), value.into());
        self
    }

    pub fn field_equals(&self) -> &HashMap<String, Value> {
        &self.field_equals
    }

    pub fn field_not_equals(&self) -> &HashMap<String, Value> {
        &self.field_not_equals
    }

    /// Whether a JSON object body satisfies every filter.
    pub fn matches(&self, body: &Value) -> bool {
        let equals = self
            .field_equals
            .iter()
            .all(|(field, value)| body.get(field) == Some(value));
        let not_equals = self
            .field_not_equals
            .iter()
            .all(|(field, value)| body.get(field) != Some(value));
        equals && not_equals
    }
}
