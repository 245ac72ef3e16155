use crate::error::{Result, TermShortError};

/// Marker every hex term id starts with.
pub const ID_MARKER: &str = "0x";

/// Digit count of a fully-specified term id (256 bits).
pub const FULL_ID_DIGITS: usize = 64;

/// Returns the hex digits of an id, if it has the `0x` marker shape.
fn hex_digits(id: &str) -> Option<&str> {
    let digits = id.strip_prefix(ID_MARKER)?;
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(digits)
    } else {
        None
    }
}

/// Returns true if the id is a fully-specified term id: `0x` + 64 hex digits.
pub fn is_full_term_id(id: &str) -> bool {
    hex_digits(id).is_some_and(|d| d.len() == FULL_ID_DIGITS)
}

/// Validates that an id is a fully-specified term id.
///
/// # Errors
///
/// Returns `InvalidInput` if the marker is missing, the digit count is not
/// exactly 64, or a non-hex character appears.
pub fn validate_full_id(id: &str) -> Result<()> {
    if is_full_term_id(id) {
        Ok(())
    } else {
        Err(TermShortError::InvalidInput { id: id.to_string() })
    }
}

/// Normalizes an id to its canonical lowercase form.
pub fn normalize_id(id: &str) -> String {
    id.to_lowercase()
}

/// Extracts a term id from a portal URL or bare id string.
///
/// Accepted inputs, in priority order:
/// 1. A bare full id (`0x` + 64 hex digits)
/// 2. An id following an `/atom/` or `/triple/` path segment
/// 3. Any `0x`-run of 64 or more hex digits
/// 4. Any shorter `0x`-run (partial prefix)
///
/// The extracted id is lowercased. Returns None if no `0x`-run is present.
pub fn extract_id_from_url(url: &str) -> Option<String> {
    let url = url.trim().to_lowercase();
    if url.is_empty() {
        return None;
    }

    if is_full_term_id(&url) {
        return Some(url);
    }

    // Collect every 0x-prefixed hex run with its start offset.
    let mut runs: Vec<(usize, String)> = Vec::new();
    for (start, _) in url.match_indices(ID_MARKER) {
        let digits: String = url[start + ID_MARKER.len()..]
            .chars()
            .take_while(char::is_ascii_hexdigit)
            .collect();
        if !digits.is_empty() {
            runs.push((start, format!("{ID_MARKER}{digits}")));
        }
    }

    // Path-segment matches win over bare runs.
    for (start, id) in &runs {
        let before = &url[..*start];
        if before.ends_with("/atom/") || before.ends_with("/triple/") {
            return Some(id.clone());
        }
    }

    // Then any run long enough to be a full id.
    for (_, id) in &runs {
        if id.len() >= ID_MARKER.len() + FULL_ID_DIGITS {
            return Some(id.clone());
        }
    }

    // Finally any partial prefix run.
    runs.into_iter().next().map(|(_, id)| id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_id(prefix: &str) -> String {
        format!("{ID_MARKER}{prefix}{}", "0".repeat(FULL_ID_DIGITS - prefix.len()))
    }

    // ========== is_full_term_id / validate_full_id ==========

    #[test]
    fn test_full_id_accepted() {
        let id = full_id("8c48");
        assert!(is_full_term_id(&id));
        assert!(validate_full_id(&id).is_ok());
    }

    #[test]
    fn test_uppercase_digits_accepted() {
        let id = format!("0x{}", "A".repeat(64));
        assert!(is_full_term_id(&id));
    }

    #[test]
    fn test_partial_prefix_is_not_full() {
        assert!(!is_full_term_id("0x8c48"));
        assert!(validate_full_id("0x8c48").is_err());
    }

    #[test]
    fn test_missing_marker_rejected() {
        let bare = "8c48".repeat(16);
        assert_eq!(bare.len(), 64);
        assert!(validate_full_id(&bare).is_err());
    }

    #[test]
    fn test_too_long_rejected() {
        let id = format!("0x{}", "a".repeat(65));
        assert!(validate_full_id(&id).is_err());
    }

    #[test]
    fn test_non_hex_rejected() {
        let id = format!("0x{}g", "a".repeat(63));
        assert!(validate_full_id(&id).is_err());
    }

    #[test]
    fn test_validate_error_carries_id() {
        match validate_full_id("0xzz") {
            Err(TermShortError::InvalidInput { id }) => assert_eq!(id, "0xzz"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    // ========== normalize_id ==========

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize_id("0x8C48AB"), "0x8c48ab");
        assert_eq!(normalize_id("0x8c48"), "0x8c48");
    }

    // ========== extract_id_from_url ==========

    #[test]
    fn test_extract_bare_full_id() {
        let id = full_id("8c48");
        assert_eq!(extract_id_from_url(&id), Some(id));
    }

    #[test]
    fn test_extract_bare_full_id_lowercased() {
        let id = format!("0x{}", "AB".repeat(32));
        assert_eq!(extract_id_from_url(&id), Some(id.to_lowercase()));
    }

    #[test]
    fn test_extract_from_atom_url() {
        let id = full_id("8c48");
        let url = format!("https://portal.example.com/explore/atom/{id}?tab=overview");
        assert_eq!(extract_id_from_url(&url), Some(id));
    }

    #[test]
    fn test_extract_from_triple_url() {
        let id = full_id("ab12");
        let url = format!("https://portal.example.com/explore/triple/{id}");
        assert_eq!(extract_id_from_url(&url), Some(id));
    }

    #[test]
    fn test_extract_partial_prefix_from_path() {
        let url = "https://portal.example.com/explore/atom/0x8c48";
        assert_eq!(extract_id_from_url(url), Some("0x8c48".to_string()));
    }

    #[test]
    fn test_extract_prefers_path_segment_over_earlier_run() {
        let id = full_id("ab12");
        let url = format!("https://0xdead.example.com/explore/atom/{id}");
        assert_eq!(extract_id_from_url(&url), Some(id));
    }

    #[test]
    fn test_extract_long_run_from_query() {
        let id = full_id("cafe");
        let url = format!("https://example.com/page?id={id}&x=1");
        assert_eq!(extract_id_from_url(&url), Some(id));
    }

    #[test]
    fn test_extract_first_short_run_as_fallback() {
        let url = "see 0x8c48 and 0xab12";
        assert_eq!(extract_id_from_url(url), Some("0x8c48".to_string()));
    }

    #[test]
    fn test_extract_with_surrounding_whitespace() {
        let id = full_id("8c48");
        assert_eq!(extract_id_from_url(&format!("  {id}  ")), Some(id));
    }

    #[test]
    fn test_extract_none_without_marker() {
        assert_eq!(extract_id_from_url("https://example.com/about"), None);
        assert_eq!(extract_id_from_url(""), None);
        assert_eq!(extract_id_from_url("just words"), None);
    }

    #[test]
    fn test_extract_none_for_bare_marker() {
        assert_eq!(extract_id_from_url("0x"), None);
    }
}
