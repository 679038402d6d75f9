//! Request-level input checks that the `validator` derives cannot express.

use unicode_normalization::UnicodeNormalization;

use crate::error::ApiError;

/// Longest tag name accepted, in characters.
pub const MAX_TAG_LENGTH: usize = 50;

pub const DEFAULT_HISTORY_LIMIT: i64 = 20;
pub const MAX_HISTORY_LIMIT: i64 = 100;

/// Canonical form of a tag name: NFKC, lowercase, inner whitespace collapsed.
///
/// `"  Rust  Basics "` and `"rust basics"` name the same tag.
///
/// # Examples
/// ```
/// use qc_api::validation::normalize_tag;
///
/// assert_eq!(normalize_tag("  Rust  Basics ").unwrap(), "rust basics");
/// assert!(normalize_tag("   ").is_err());
/// ```
pub fn normalize_tag(raw: &str) -> Result<String, ApiError> {
    let normalized = raw
        .nfkc()
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if normalized.is_empty() {
        return Err(ApiError::Validation("Tag cannot be empty".to_string()));
    }

    if normalized.chars().count() > MAX_TAG_LENGTH {
        return Err(ApiError::Validation(format!(
            "Tag '{normalized}' is longer than {MAX_TAG_LENGTH} characters"
        )));
    }

    if normalized.chars().any(char::is_control) {
        return Err(ApiError::Validation(
            "Tag cannot contain control characters".to_string(),
        ));
    }

    Ok(normalized)
}

/// Page size for attempt history: defaults to 20, rejects anything outside 1..=100.
pub fn history_limit(requested: Option<i64>) -> Result<i64, ApiError> {
    match requested {
        None => Ok(DEFAULT_HISTORY_LIMIT),
        Some(limit) if (1..=MAX_HISTORY_LIMIT).contains(&limit) => Ok(limit),
        Some(limit) => Err(ApiError::Validation(format!(
            "limit must be between 1 and {MAX_HISTORY_LIMIT}, got {limit}"
        ))),
    }
}
