//! Domain models shared across litterlog crates.

pub mod photo;

pub use photo::{PhotoOrigin, PhotoRecord, TagMap};
