//! Storage and persistence layer
//!
//! - File system operations
//! - Versioned envelope around the canonical state encoding
//! - Data models

mod file_system;
mod models;
mod record;

pub use file_system::{is_valid_wallet_name, Storage};
pub use models::Metadata;
pub use record::{open_record, seal_record, RECORD_MAGIC, RECORD_VERSION};
