//! JSON syntax probing helpers.
//!
//! Low-level primitives used by the repair pipeline: whole-input validation,
//! extraction of the largest valid JSON substring from corrupted text, and
//! collapsing of back-to-back duplicated payloads (some providers re-send an
//! already-complete arguments object in a later stream event).

use serde_json::Value;

/// Check whether the entire input is one syntactically valid JSON value.
pub fn is_valid_json(text: &str) -> bool {
    serde_json::from_str::<Value>(text).is_ok()
}

/// Parse one complete JSON value starting at the beginning of `text`.
///
/// Returns the byte length of the value's text on success. Unlike
/// [`is_valid_json`] this accepts trailing garbage after the value.
fn valid_prefix_len(text: &str) -> Option<usize> {
    let mut stream = serde_json::Deserializer::from_str(text).into_iter::<Value>();
    match stream.next() {
        Some(Ok(_)) => Some(stream.byte_offset()),
        _ => None,
    }
}

/// Find the largest substring of `text` that parses as a complete JSON value.
///
/// Candidate starts are `{` and `[` positions; from each, the longest
/// parseable prefix is taken and the overall longest candidate wins. Returns
/// `None` when no candidate parses.
pub fn extract_largest_valid_json(text: &str) -> Option<String> {
    let mut best: Option<&str> = None;

    for (pos, ch) in text.char_indices() {
        if ch != '{' && ch != '[' {
            continue;
        }
        if let Some(len) = valid_prefix_len(&text[pos..]) {
            let candidate = &text[pos..pos + len];
            if best.is_none_or(|b| candidate.len() > b.len()) {
                best = Some(candidate);
            }
        }
    }

    best.map(|s| s.to_string())
}

/// Collapse an exact back-to-back duplication of one JSON value.
///
/// Handles both `XX` (identical halves) and `X` followed by a re-sent copy
/// differing only in surrounding whitespace. Input is returned unchanged when
/// no duplication is detected.
pub fn collapse_duplicated_fragment(text: &str) -> String {
    let trimmed = text.trim();

    // Identical halves, first half a complete value. The midpoint may land
    // inside a multibyte character; such input cannot be two equal halves
    let mid = trimmed.len() / 2;
    if trimmed.len() % 2 == 0 && trimmed.is_char_boundary(mid) {
        let (first, second) = trimmed.split_at(mid);
        if first == second && is_valid_json(first.trim()) {
            return first.trim().to_string();
        }
    }

    // Complete value followed by a whitespace-padded repeat of itself
    if let Some(len) = valid_prefix_len(trimmed) {
        let prefix = &trimmed[..len];
        let rest = trimmed[len..].trim();
        if !rest.is_empty() && rest == prefix.trim() {
            return prefix.trim().to_string();
        }
    }

    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_json() {
        assert!(is_valid_json("{\"a\":1}"));
        assert!(is_valid_json("[1,2,3]"));
        assert!(is_valid_json("\"text\""));
        assert!(!is_valid_json("{\"a\":1"));
        assert!(!is_valid_json("{\"a\":1}{\"a\":1}"));
        assert!(!is_valid_json(""));
    }

    #[test]
    fn test_extract_from_surrounding_garbage() {
        assert_eq!(
            extract_largest_valid_json("noise {\"a\": 1} more noise"),
            Some("{\"a\": 1}".to_string())
        );
    }

    #[test]
    fn test_extract_picks_largest_candidate() {
        let text = "{\"a\":1} {\"b\":{\"nested\":true}}";
        assert_eq!(
            extract_largest_valid_json(text),
            Some("{\"b\":{\"nested\":true}}".to_string())
        );
    }

    #[test]
    fn test_extract_handles_arrays() {
        assert_eq!(
            extract_largest_valid_json("x[1,2,3]y"),
            Some("[1,2,3]".to_string())
        );
    }

    #[test]
    fn test_extract_none_when_nothing_parses() {
        assert_eq!(extract_largest_valid_json("{\"a\": "), None);
        assert_eq!(extract_largest_valid_json("plain text"), None);
    }

    #[test]
    fn test_extract_ignores_braces_inside_strings() {
        // The '{' inside the string is a candidate start but never parses,
        // so only the outer object survives
        let text = "{\"a\":\"{broken\"}";
        assert_eq!(extract_largest_valid_json(text), Some(text.to_string()));
    }

    #[test]
    fn test_collapse_identical_halves() {
        assert_eq!(
            collapse_duplicated_fragment("{\"query\":\"cats\"}{\"query\":\"cats\"}"),
            "{\"query\":\"cats\"}"
        );
    }

    #[test]
    fn test_collapse_whitespace_separated_repeat() {
        assert_eq!(
            collapse_duplicated_fragment("{\"a\":1} {\"a\":1}"),
            "{\"a\":1}"
        );
    }

    #[test]
    fn test_collapse_handles_multibyte_text() {
        // Midpoint inside 'é'; must not panic, input comes back unchanged
        assert_eq!(collapse_duplicated_fragment("{é}"), "{é}");

        // A duplicated payload with non-ASCII query text still collapses
        assert_eq!(
            collapse_duplicated_fragment("{\"query\":\"café\"}{\"query\":\"café\"}"),
            "{\"query\":\"café\"}"
        );
    }

    #[test]
    fn test_collapse_leaves_non_duplicates_alone() {
        assert_eq!(collapse_duplicated_fragment("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(
            collapse_duplicated_fragment("{\"a\":1}{\"b\":2}"),
            "{\"a\":1}{\"b\":2}"
        );
        assert_eq!(collapse_duplicated_fragment("not json"), "not json");
    }
}
