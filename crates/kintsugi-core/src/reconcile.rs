//! Streamed argument fragment reconciliation.
//!
//! Non-search tools get exact concatenation, preserving streaming semantics
//! byte for byte. Search tools get a merge policy instead: providers sometimes
//! re-emit an already-complete `{"query": ...}` object in a later stream
//! event, and naive concatenation would corrupt the buffer. The search path
//! always returns valid JSON text and never panics.

use crate::category::ToolCategory;
use serde_json::{Map, Value};

const EMPTY_OBJECT: &str = "{}";

/// Merge one streamed fragment into the accumulated argument text.
///
/// `fallback_query` is consulted only on the search path, when neither the
/// accumulated text nor the fragment yields a query (typically backed by
/// [`crate::history::fallback_query_from_history`]).
pub fn merge(
    tool_name: Option<&str>,
    current_args: &str,
    new_fragment: &str,
    fallback_query: impl FnOnce() -> String,
) -> String {
    if ToolCategory::of(tool_name) != ToolCategory::Search {
        return format!("{}{}", current_args, new_fragment);
    }

    merge_search_args(current_args, new_fragment, fallback_query)
}

/// Search-tool merge policy.
///
/// A prior non-empty `query` is authoritative: the new fragment is discarded
/// outright rather than appended. This silently drops refinements a later
/// fragment might carry; downstream behavior depends on the suppression, so
/// it is kept as-is.
fn merge_search_args(
    current_args: &str,
    new_fragment: &str,
    fallback_query: impl FnOnce() -> String,
) -> String {
    let current_obj = decode_object(current_args);

    if !current_args.is_empty() && current_args != EMPTY_OBJECT {
        if let Some(obj) = &current_obj
            && obj
                .get("query")
                .and_then(|q| q.as_str())
                .is_some_and(|q| !q.trim().is_empty())
        {
            return current_args.to_string();
        }
    }

    let mut working = current_obj.unwrap_or_default();

    match decode_object(new_fragment) {
        Some(fragment_obj) => {
            if let Some(query) = fragment_obj.get("query") {
                working.insert("query".to_string(), query.clone());
            } else {
                // Fragment fields win on key collision
                for (key, value) in fragment_obj {
                    working.insert(key, value);
                }
            }
        }
        None => {
            let literal = new_fragment.trim();
            if !literal.is_empty() {
                working.insert("query".to_string(), Value::String(literal.to_string()));
            }
        }
    }

    if !working.contains_key("query") {
        working.insert("query".to_string(), Value::String(fallback_query()));
    }

    Value::Object(working).to_string()
}

/// Decode text as a JSON object, `None` for anything else.
fn decode_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn no_fallback() -> String {
        panic!("fallback query should not be consulted");
    }

    fn parsed(args: &str) -> Value {
        serde_json::from_str(args).expect("merge output must be valid JSON")
    }

    #[test]
    fn test_non_search_concatenates() {
        assert_eq!(merge(None, "", "abc", no_fallback), "abc");
        assert_eq!(
            merge(Some("write_file"), "{\"pa", "th\": \"x\"}", no_fallback),
            "{\"path\": \"x\"}"
        );
    }

    #[test]
    fn test_non_search_is_byte_exact() {
        assert_eq!(
            merge(Some("run_shell"), "  {\"cmd\"", ": \"ls\" } ", no_fallback),
            "  {\"cmd\": \"ls\" } "
        );
    }

    #[test]
    fn test_search_duplicate_query_suppressed() {
        let current = "{\"query\":\"cats\"}";
        assert_eq!(
            merge(Some("web_search"), current, "{\"query\":\"dogs\"}", no_fallback),
            current
        );
    }

    #[test]
    fn test_search_plain_text_becomes_query() {
        let out = merge(Some("web_search"), "", "paris weather", no_fallback);
        assert_eq!(parsed(&out), json!({"query": "paris weather"}));
    }

    #[test]
    fn test_search_plain_text_is_trimmed() {
        let out = merge(Some("web_search"), "", "  paris weather \n", no_fallback);
        assert_eq!(parsed(&out), json!({"query": "paris weather"}));
    }

    #[test]
    fn test_search_fragment_query_adopted_over_empty_current() {
        let out = merge(Some("web_search"), "{}", "{\"query\":\"dogs\"}", no_fallback);
        assert_eq!(parsed(&out), json!({"query": "dogs"}));
    }

    #[test]
    fn test_search_whitespace_query_not_authoritative() {
        // A blank prior query does not suppress the fragment
        let out = merge(
            Some("web_search"),
            "{\"query\":\"  \"}",
            "{\"query\":\"dogs\"}",
            no_fallback,
        );
        assert_eq!(parsed(&out), json!({"query": "dogs"}));
    }

    #[test]
    fn test_search_object_fields_merged_fragment_wins() {
        let out = merge(
            Some("web_search"),
            "{\"limit\": 5}",
            "{\"limit\": 10, \"site\": \"example.org\"}",
            || "from history".to_string(),
        );
        assert_eq!(
            parsed(&out),
            json!({"limit": 10, "site": "example.org", "query": "from history"})
        );
    }

    #[test]
    fn test_search_fallback_used_when_no_query_anywhere() {
        let out = merge(Some("web_search"), "", "", || "last user text".to_string());
        assert_eq!(parsed(&out), json!({"query": "last user text"}));
    }

    #[test]
    fn test_search_invalid_current_still_yields_valid_json() {
        let out = merge(
            Some("web_search"),
            "{\"query\": \"ca",
            "ts\"}",
            no_fallback,
        );
        // Truncated current decodes to nothing; the fragment text becomes the
        // literal query
        assert_eq!(parsed(&out), json!({"query": "ts\"}"}));
    }

    #[test]
    fn test_search_output_always_valid_json() {
        let cases = [
            ("", "dogs"),
            ("{}", "{\"query\":\"dogs\"}"),
            ("garbage", "more garbage"),
            ("{\"limit\":1}", "{\"site\":\"a\"}"),
        ];
        for (current, fragment) in cases {
            let out = merge(Some("search"), current, fragment, || "fb".to_string());
            parsed(&out);
        }
    }
}
