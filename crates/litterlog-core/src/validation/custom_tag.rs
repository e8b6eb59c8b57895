//! Custom-tag validation
//!
//! Free-text litter tags are user input and get the full treatment
//! before they touch a record:
//! - Length bounds: 3 to 99 characters
//! - Case-insensitive uniqueness within one photo's existing tags
//! - Per-photo cap of 10 custom tags

use crate::error::AppError;

/// Minimum length for a custom tag (3 characters).
pub const CUSTOM_TAG_MIN_LENGTH: usize = 3;

/// Maximum length for a custom tag (99 characters).
pub const CUSTOM_TAG_MAX_LENGTH: usize = 99;

/// Maximum number of custom tags a single photo may carry (10).
pub const MAX_CUSTOM_TAGS_PER_PHOTO: usize = 10;

/// Validate a candidate custom tag against a photo's existing tags.
///
/// Rules:
/// - `text` must be between 3 and 99 characters
/// - `text` must not duplicate an existing tag, compared case-insensitively
/// - the photo must hold fewer than 10 custom tags already
pub fn validate_custom_tag(text: &str, existing: &[String]) -> Result<(), AppError> {
    let len = text.chars().count();
    if len < CUSTOM_TAG_MIN_LENGTH {
        return Err(AppError::Validation(format!(
            "Custom tag '{}' is too short: minimum {} characters",
            text, CUSTOM_TAG_MIN_LENGTH
        )));
    }
    if len > CUSTOM_TAG_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "Custom tag is too long: maximum {} characters",
            CUSTOM_TAG_MAX_LENGTH
        )));
    }

    let lowered = text.to_lowercase();
    if existing.iter().any(|t| t.to_lowercase() == lowered) {
        return Err(AppError::Validation(format!(
            "Custom tag '{}' already exists on this photo",
            text
        )));
    }

    if existing.len() >= MAX_CUSTOM_TAGS_PER_PHOTO {
        return Err(AppError::Validation(format!(
            "Photo already has the maximum of {} custom tags",
            MAX_CUSTOM_TAGS_PER_PHOTO
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_below_minimum_length() {
        assert!(validate_custom_tag("ab", &[]).is_err());
        assert!(validate_custom_tag("", &[]).is_err());
        assert!(validate_custom_tag("abc", &[]).is_ok());
    }

    #[test]
    fn boundary_at_maximum_length() {
        let ok = "a".repeat(99);
        let too_long = "a".repeat(100);
        assert!(validate_custom_tag(&ok, &[]).is_ok());
        assert!(validate_custom_tag(&too_long, &[]).is_err());
    }

    #[test]
    fn rejects_case_insensitive_duplicate() {
        let existing = vec!["Crisp Packet".to_string()];
        assert!(validate_custom_tag("crisp packet", &existing).is_err());
        assert!(validate_custom_tag("CRISP PACKET", &existing).is_err());
        assert!(validate_custom_tag("bottle cap", &existing).is_ok());
    }

    #[test]
    fn rejects_eleventh_tag() {
        let existing: Vec<String> = (0..10).map(|i| format!("tag-{}", i)).collect();
        let err = validate_custom_tag("one more", &existing).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
