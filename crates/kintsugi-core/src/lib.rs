//! kintsugi-core: reconciliation and repair of streamed tool-call arguments.
//!
//! LLM providers stream the JSON arguments of a tool call as text fragments,
//! and the fragments are frequently malformed: duplicated sub-objects,
//! garbled boolean literals, mismatched braces. This crate accumulates and
//! merges fragments per tool call, repairs near-valid argument text through a
//! fixed sequence of heuristics, and classifies opaque provider errors into a
//! transient-connection-failure verdict for stream-retry decisions.
//!
//! Everything is synchronous and total: no operation panics, blocks, or
//! returns an error for malformed input. The transport that produces
//! fragments and the retry loop that consumes verdicts live elsewhere.
//!
//! # Quick start
//!
//! ```
//! use kintsugi_core::{merge, repair};
//!
//! // Non-search fragments concatenate exactly
//! let args = merge(Some("write_file"), "{\"pa", "th\": \"x\"}", String::new);
//! assert_eq!(args, "{\"path\": \"x\"}");
//!
//! // Near-valid text is repaired on finalization
//! assert_eq!(repair("{\"a\":1"), "{\"a\":1}");
//! ```

pub mod accumulate;
pub mod category;
pub mod classify;
pub mod history;
pub mod json_scan;
pub mod model_support;
pub mod reconcile;
pub mod repair;

// Re-export the operational surface
pub use accumulate::{CompletedToolCall, ToolCallAccumulator, ToolCallCollector, ToolCallFragment};
pub use category::ToolCategory;
pub use classify::{ClassifiedError, classify, extract_message, is_connection_error};
pub use history::fallback_query_from_history;
pub use json_scan::{collapse_duplicated_fragment, extract_largest_valid_json, is_valid_json};
pub use model_support::supports_tool_calls;
pub use reconcile::merge;
pub use repair::{RepairOutcome, RepairStrategy, repair, repair_with_outcome};
