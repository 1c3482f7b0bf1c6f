//! Tool-capability catalog.
//!
//! Not every provider/model pair supports structured tool calls; callers gate
//! tool advertising on this predicate before building a request. The table is
//! a fixed prefix list per provider, safely readable from any number of
//! threads.

/// Model-id prefixes with tool-call support, per provider.
const TOOL_CAPABLE_MODELS: &[(&str, &[&str])] = &[
    ("openai", &["gpt-4", "gpt-4o", "gpt-5", "o1", "o3", "o4"]),
    ("anthropic", &["claude-3", "claude-sonnet", "claude-opus", "claude-haiku"]),
    ("deepseek", &["deepseek-chat", "deepseek-reasoner"]),
    ("mistral", &["mistral-large", "mistral-medium", "mistral-small", "codestral"]),
    ("openrouter", &[""]),
];

/// Whether `model` on `provider` supports structured tool calls.
///
/// Case-insensitive prefix match; unknown providers return false.
pub fn supports_tool_calls(provider: &str, model: &str) -> bool {
    let provider = provider.to_lowercase();
    let model = model.to_lowercase();

    TOOL_CAPABLE_MODELS
        .iter()
        .find(|(p, _)| *p == provider)
        .is_some_and(|(_, prefixes)| prefixes.iter().any(|prefix| model.starts_with(prefix)))
}
