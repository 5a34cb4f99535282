//! String normalization and truncation helpers used by `clean`.
//!
//! Lengths are counted in characters, so truncation never splits a
//! multi-byte code point.

/// Marker appended to truncated values.
pub const ELLIPSIS: &str = "...";

/// Markdown code fence preserved at the end of truncated values.
pub const CODE_FENCE: &str = "```";

/// Placeholder substituted at render time; stripped from fallback text.
pub const STATUS_PLACEHOLDER: &str = ":status:";

/// Trim leading and trailing whitespace in place.
pub fn trim(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Trim and lowercase in place.
pub fn trim_lower(value: &mut String) {
    *value = value.trim().to_lowercase();
}

/// Trim and uppercase in place.
pub fn trim_upper(value: &mut String) {
    *value = value.trim().to_uppercase();
}

/// Trim, then replace every newline with a single space.
pub fn single_line(value: &mut String) {
    *value = value.trim().replace('\n', " ");
}

/// Remove every `:status:` placeholder, including ones formed by a
/// previous removal.
pub fn strip_status_placeholder(value: &mut String) {
    while value.contains(STATUS_PLACEHOLDER) {
        *value = value.replace(STATUS_PLACEHOLDER, "");
    }
}

/// Character count of `value`.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Truncate `value` in place so that it is at most `max` characters long.
///
/// A truncated value ends with `...`. When the original ends with a code
/// fence, the fence is kept after the ellipsis so the block stays closed.
pub fn truncate(value: &mut String, max: usize) {
    if char_len(value) <= max {
        return;
    }

    let suffix = if value.ends_with(CODE_FENCE) && max >= ELLIPSIS.len() + CODE_FENCE.len() {
        format!("{ELLIPSIS}{CODE_FENCE}")
    } else {
        ELLIPSIS.to_string()
    };

    let keep = max.saturating_sub(suffix.len());
    let mut truncated: String = value.chars().take(keep).collect();
    truncated.push_str(&suffix);
    *value = truncated;
}
