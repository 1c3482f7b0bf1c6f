//! Tool category classification.
//!
//! Streamed tool-call arguments get category-specific merge handling (search
//! tools in particular, see [`crate::reconcile`]). Membership is decided by
//! case-insensitive substring match against a fixed pattern table; the first
//! category whose pattern matches wins.

/// Category of a tool, as inferred from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolCategory {
    Search,
    Code,
    Math,
    Other,
}

/// Name-substring patterns per category, checked in order.
///
/// Lowercase; tool names are lowercased before matching.
const CATEGORY_PATTERNS: &[(ToolCategory, &[&str])] = &[
    (ToolCategory::Search, &["search", "lookup", "query", "browse"]),
    (ToolCategory::Code, &["code", "execute", "interpreter", "shell"]),
    (ToolCategory::Math, &["math", "calc", "compute"]),
];

impl ToolCategory {
    /// Classify a tool name. `None` and unmatched names are [`ToolCategory::Other`].
    pub fn of(tool_name: Option<&str>) -> ToolCategory {
        let Some(name) = tool_name else {
            return ToolCategory::Other;
        };

        let lower = name.to_lowercase();
        for (category, patterns) in CATEGORY_PATTERNS {
            if patterns.iter().any(|p| lower.contains(p)) {
                return *category;
            }
        }
        ToolCategory::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_tools() {
        assert_eq!(ToolCategory::of(Some("web_search")), ToolCategory::Search);
        assert_eq!(ToolCategory::of(Some("SearchDocs")), ToolCategory::Search);
        assert_eq!(ToolCategory::of(Some("dns_lookup")), ToolCategory::Search);
        assert_eq!(ToolCategory::of(Some("browse_page")), ToolCategory::Search);
    }

    #[test]
    fn test_code_and_math_tools() {
        assert_eq!(
            ToolCategory::of(Some("code_interpreter")),
            ToolCategory::Code
        );
        assert_eq!(ToolCategory::of(Some("run_shell")), ToolCategory::Code);
        assert_eq!(ToolCategory::of(Some("calculator")), ToolCategory::Math);
    }

    #[test]
    fn test_table_order_wins_on_overlap() {
        // "query" (search) appears before any code pattern could match
        assert_eq!(
            ToolCategory::of(Some("query_executor")),
            ToolCategory::Search
        );
    }

    #[test]
    fn test_unknown_and_missing_names() {
        assert_eq!(ToolCategory::of(Some("send_email")), ToolCategory::Other);
        assert_eq!(ToolCategory::of(None), ToolCategory::Other);
        assert_eq!(ToolCategory::of(Some("")), ToolCategory::Other);
    }
}
