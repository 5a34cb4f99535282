pub mod channel_processing_state;
pub mod issue;
