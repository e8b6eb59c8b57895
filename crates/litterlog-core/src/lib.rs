//! Litterlog Core Library
//!
//! Core domain models, the photo store, error types, configuration, and
//! validation shared across all litterlog crates.

pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, UploadFailureKind};
pub use models::{PhotoOrigin, PhotoRecord, TagMap};
pub use store::{PhotoStore, RecentTags, CUSTOM_TAG_CATEGORY, RECENT_TAGS_CAP};
