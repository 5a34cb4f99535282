//! Storage contract for alerts, issues, move mappings and channel
//! processing state, plus an in-memory implementation for tests and local
//! runs.

pub mod error;
pub mod find_options;
pub mod memory;
pub mod models;
pub mod store;

pub use error::DbError;
pub use find_options::FindOptions;
pub use memory::InMemoryStore;
pub use models::channel_processing_state::ChannelProcessingState;
pub use models::issue::{Issue, MoveMapping};
pub use store::Store;
