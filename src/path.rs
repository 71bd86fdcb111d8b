//! Building endpoint paths from caller input.

use crate::error::{OnypheError, Result};

/// Checks an identifier (IP, domain, hostname, hash, onion address) before it becomes a path segment.
///
/// Identifiers are joined as-is, so anything that would change the shape of the
/// path or the URL is refused here.
pub fn check_identifier<'a>(kind: &str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(OnypheError::invalid_argument(format!("{} is empty", kind)));
    }

    if is_dot_segment(value) {
        return Err(OnypheError::invalid_argument(format!(
            "{} '{}' is a dot segment",
            kind, value
        )));
    }

    if let Some(c) = value
        .chars()
        .find(|c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace() || c.is_control())
    {
        return Err(OnypheError::invalid_argument(format!(
            "{} '{}' contains invalid character {:?}",
            kind, value, c
        )));
    }

    Ok(value)
}

/// Percent-encodes free-form query text for use as a single path segment.
///
/// Everything except ASCII alphanumerics and `-_.~` is escaped. Callers must
/// refuse dot segments first (see [`is_dot_segment`]).
pub fn encode_query(query: &str) -> String {
    urlencoding::encode(query).into_owned()
}

/// `.` and `..` are folded into the parent path by URL resolution, escaped or
/// not (`%2E` counts as a dot), so they can never be sent as a segment.
pub fn is_dot_segment(value: &str) -> bool {
    value == "." || value == ".."
}

/// Encodes a lookup argument that may be free text rather than an identifier.
///
/// IP addresses and plain words come out unchanged.
pub fn encode_free_text(kind: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(OnypheError::invalid_argument(format!("{} is empty", kind)));
    }
    if is_dot_segment(value) {
        return Err(OnypheError::invalid_argument(format!(
            "{} '{}' is a dot segment",
            kind, value
        )));
    }
    Ok(encode_query(value))
}

/// Segments for a full-text search: `search/<category...>/<encoded query>`.
pub fn search_segments(categories: &[&str], query: &str) -> Result<Vec<String>> {
    if query.trim().is_empty() {
        return Err(OnypheError::invalid_argument("search query is empty"));
    }
    if is_dot_segment(query) {
        return Err(OnypheError::invalid_argument(format!(
            "search query '{}' is a dot segment",
            query
        )));
    }

    let mut segments = Vec::with_capacity(categories.len() + 2);
    segments.push("search".to_string());
    segments.extend(categories.iter().map(|c| c.to_string()));
    segments.push(encode_query(query));
    Ok(segments)
}
