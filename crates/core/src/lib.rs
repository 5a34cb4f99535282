//! Alert model, normalization and validation.
//!
//! An [`Alert`](alert::Alert) is cleaned in place with
//! [`Alert::clean`](alert::Alert::clean), checked with
//! [`Alert::validate`](alert::Alert::validate), and only then deduplicated
//! or persisted via [`Alert::dedup_id`](alert::Alert::dedup_id) and
//! [`Alert::unique_id`](alert::Alert::unique_id). No I/O happens here.

#[macro_use]
mod macros;

pub mod alert;
mod checks;
pub mod error;
pub mod escalation;
pub mod field;
pub mod hashing;
pub mod severity;
pub mod text;
pub mod types;
pub mod webhook;

pub use alert::{validate_alert, Alert};
pub use error::CoreError;
pub use escalation::Escalation;
pub use field::Field;
pub use severity::AlertSeverity;
pub use webhook::{
    Webhook, WebhookAccessLevel, WebhookButtonStyle, WebhookCheckboxInput, WebhookCheckboxOption,
    WebhookDisplayMode, WebhookPlainTextInput,
};
