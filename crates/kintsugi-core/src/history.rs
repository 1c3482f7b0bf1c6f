//! Fallback query extraction from chat history.
//!
//! When a search tool's streamed arguments never produce a usable `query`,
//! the most recent user message stands in for it. Messages are the wire-shape
//! JSON values sent to providers: `content` is either a plain string or an
//! array of content blocks with `{"type": "text", "text": ...}`.

use serde_json::Value;

/// Extract the trimmed text of the newest user message, or `""`.
pub fn fallback_query_from_history(messages: &[Value]) -> String {
    messages
        .iter()
        .rev()
        .find(|m| m.get("role").and_then(|r| r.as_str()) == Some("user"))
        .and_then(message_text)
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

/// Pull displayable text out of a message's `content` field.
fn message_text(message: &Value) -> Option<String> {
    let content = message.get("content")?;

    if let Some(text) = content.as_str() {
        return Some(text.to_string());
    }

    // Content-block arrays: concatenate the text blocks
    let blocks = content.as_array()?;
    let text: Vec<&str> = blocks
        .iter()
        .filter(|b| b.get("type").and_then(|t| t.as_str()) == Some("text"))
        .filter_map(|b| b.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text.join("\n"))
    }
}
