//! Error classification for stream-retry decisions.
//!
//! Provider errors arrive in heterogeneous shapes: JSON objects with a
//! `message` and sometimes a `code`, bare strings, or arbitrary values that
//! callers have stringified. This module normalizes them to a message string
//! and decides whether the failure is a transient connection error (eligible
//! for a stream retry) or fatal. Both functions are total and pure.

use serde::Serialize;
use serde_json::Value;

/// Sentinel for an error value carrying an empty `message` field.
const UNKNOWN_ERROR: &str = "Unknown error";

/// Sentinel for a value with no usable textual representation.
const UNKNOWN_ERROR_OCCURRED: &str = "Unknown error occurred";

/// Message substrings that indicate a transient connection failure.
///
/// Case-sensitive, matching what providers actually emit.
const CONNECTION_ERROR_MESSAGES: &[&str] =
    &["Premature close", "aborted", "network error", "timeout"];

/// Error codes that indicate a transient connection failure.
const CONNECTION_ERROR_CODES: &[&str] = &[
    "ERR_STREAM_PREMATURE_CLOSE",
    "ECONNRESET",
    "ETIMEDOUT",
    "ECONNABORTED",
    "ENETUNREACH",
    "ENOTFOUND",
];

/// An error value normalized for retry decisions.
///
/// Derived on demand via [`classify`]; never stored.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedError {
    pub message: String,
    pub is_connection_error: bool,
}

/// Extract a human-readable message from an opaque error value.
///
/// Priority: a non-empty string `message` field, the empty-message sentinel,
/// the string itself if the value is a string, then the value's compact JSON
/// representation. Always returns a non-empty string.
pub fn extract_message(error: &Value) -> String {
    if let Some(obj) = error.as_object() {
        if let Some(message) = obj.get("message").and_then(|m| m.as_str()) {
            if !message.is_empty() {
                return message.to_string();
            }
            return UNKNOWN_ERROR.to_string();
        }
    }

    if let Some(s) = error.as_str() {
        if !s.is_empty() {
            return s.to_string();
        }
        return UNKNOWN_ERROR_OCCURRED.to_string();
    }

    let repr = error.to_string();
    if repr.is_empty() {
        UNKNOWN_ERROR_OCCURRED.to_string()
    } else {
        repr
    }
}

/// Decide whether an error value represents a transient connection failure.
///
/// The message substrings are checked first; the `code` field is only
/// consulted when no message match is found. Non-object values are never
/// connection errors.
pub fn is_connection_error(error: &Value) -> bool {
    let Some(obj) = error.as_object() else {
        return false;
    };

    if let Some(message) = obj.get("message").and_then(|m| m.as_str()) {
        if CONNECTION_ERROR_MESSAGES.iter().any(|s| message.contains(s)) {
            return true;
        }
    }

    if let Some(code) = obj.get("code").and_then(|c| c.as_str()) {
        return CONNECTION_ERROR_CODES.contains(&code);
    }

    false
}

/// Classify an error value in one pass.
pub fn classify(error: &Value) -> ClassifiedError {
    ClassifiedError {
        message: extract_message(error),
        is_connection_error: is_connection_error(error),
    }
}
