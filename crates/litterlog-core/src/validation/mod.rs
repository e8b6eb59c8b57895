//! Validation modules

pub mod custom_tag;

pub use custom_tag::{
    validate_custom_tag, CUSTOM_TAG_MAX_LENGTH, CUSTOM_TAG_MIN_LENGTH, MAX_CUSTOM_TAGS_PER_PHOTO,
};
