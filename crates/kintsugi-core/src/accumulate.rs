//! Per-call accumulation of streamed tool-call fragments.
//!
//! Providers announce a tool call with an index/id/name event, then stream
//! its arguments as text deltas against that index. [`ToolCallCollector`]
//! owns the in-flight state for one logical stream: fragments are routed
//! through [`crate::reconcile::merge`] as they arrive, and finishing the
//! stream runs the repair pipeline over each accumulated buffer. Fragment
//! delivery must be serialized per stream by the caller; the collector itself
//! never blocks or suspends.

use crate::classify::extract_message;
use crate::reconcile::merge;
use crate::repair::{RepairOutcome, repair_with_outcome};
use serde_json::Value;

/// Cap on simultaneous tool calls per stream; indexes beyond this are
/// dropped so a hostile response cannot grow the collector unbounded.
const MAX_TOOL_CALLS: usize = 100;

/// One chunk of streamed argument text, tagged with the tool it belongs to
/// when the provider included the name in that event.
#[derive(Debug, Clone)]
pub struct ToolCallFragment {
    pub tool_name: Option<String>,
    pub text: String,
}

/// Accumulated state for one in-flight tool call.
#[derive(Default)]
pub struct ToolCallAccumulator {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

/// A finalized tool call, arguments repaired best-effort.
#[derive(Debug)]
pub struct CompletedToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
    pub outcome: RepairOutcome,
    /// Message of the residual decode failure when the repaired text still
    /// does not parse; `None` when the arguments are usable.
    pub parse_error: Option<String>,
}

/// Collects indexed tool-call fragments for one stream.
#[derive(Default)]
pub struct ToolCallCollector {
    calls: Vec<ToolCallAccumulator>,
}

impl ToolCallCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Register a tool call announced by the provider. Indexes at or beyond
    /// [`MAX_TOOL_CALLS`] are dropped.
    pub fn start(&mut self, index: usize, id: String, name: String) {
        if index >= MAX_TOOL_CALLS {
            return;
        }

        while self.calls.len() <= index {
            self.calls.push(ToolCallAccumulator::default());
        }

        self.calls[index].id = id;
        self.calls[index].name = name;
    }

    /// Merge one argument fragment into the call at `index`.
    ///
    /// Fragments for unannounced indexes are dropped, matching the provider
    /// contract that a delta always follows its start event. A fragment
    /// carrying a tool name fills in a name the start event lacked.
    pub fn append(
        &mut self,
        index: usize,
        fragment: ToolCallFragment,
        fallback_query: impl FnOnce() -> String,
    ) {
        let Some(call) = self.calls.get_mut(index) else {
            return;
        };

        if call.name.is_empty()
            && let Some(name) = fragment.tool_name
        {
            call.name = name;
        }

        let tool_name = (!call.name.is_empty()).then_some(call.name.as_str());
        call.arguments = merge(tool_name, &call.arguments, &fragment.text, fallback_query);
    }

    /// Finalize the stream: repair each accumulated buffer and report the
    /// outcome, plus the decode failure message for anything still broken.
    pub fn finish(self) -> Vec<CompletedToolCall> {
        self.calls
            .into_iter()
            .map(|call| {
                let (arguments, outcome) = repair_with_outcome(&call.arguments);
                let parse_error = serde_json::from_str::<Value>(&arguments)
                    .err()
                    .map(|e| extract_message(&Value::String(e.to_string())));

                CompletedToolCall {
                    id: call.id,
                    name: call.name,
                    arguments,
                    outcome,
                    parse_error,
                }
            })
            .collect()
    }
}
