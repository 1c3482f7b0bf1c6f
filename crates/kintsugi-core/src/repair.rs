//! Heuristic repair of near-valid tool-call argument JSON.
//!
//! Providers streaming tool-call arguments produce a known set of
//! corruptions: boolean literals garbled by duplicated characters, payloads
//! re-sent back-to-back, missing closing braces. Each corruption gets one
//! repair strategy; strategies are tried in a fixed order against the
//! original input and the first one whose output differs and validates wins.
//! The pipeline is total: input that no strategy can fix comes back
//! unchanged.

use crate::json_scan::{collapse_duplicated_fragment, extract_largest_valid_json, is_valid_json};
use regex::Regex;
use strum::AsRefStr;

/// A single repair heuristic, named for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum RepairStrategy {
    /// Empty or whitespace-only input normalized to `{}`.
    EmptyInput,
    /// Corrupted `true`/`false` literal runs fixed by the token scanner.
    BrokenBoolean,
    /// Narrow `"key": f+alse+` rewrite, tried when the scanner fails.
    BooleanRegex,
    /// Largest valid JSON substring extracted from surrounding garbage.
    LargestValidSubstring,
    /// Back-to-back duplicated payload collapsed to one copy.
    DuplicatedStructure,
    /// Missing braces appended/prepended by raw `{`/`}` count.
    BraceBalance,
    /// Literal `":\{` normalized to `":{`.
    EscapedKeyBrace,
}

/// How the pipeline resolved one input. Never persisted; for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairOutcome {
    AlreadyValid,
    Repaired(RepairStrategy),
    Unrepaired,
}

impl RepairOutcome {
    /// Short label for verbose diagnostics.
    pub fn label(&self) -> &str {
        match self {
            RepairOutcome::AlreadyValid => "already_valid",
            RepairOutcome::Repaired(strategy) => strategy.as_ref(),
            RepairOutcome::Unrepaired => "unrepaired",
        }
    }
}

/// Ordered strategy table. Order is part of the contract: the boolean regex
/// only runs after the broader boolean scanner failed, and structural
/// strategies come last.
const STRATEGIES: &[(RepairStrategy, fn(&str) -> Option<String>)] = &[
    (RepairStrategy::BrokenBoolean, fix_broken_booleans),
    (RepairStrategy::BooleanRegex, fix_false_by_regex),
    (
        RepairStrategy::LargestValidSubstring,
        extract_largest_valid_json,
    ),
    (RepairStrategy::DuplicatedStructure, collapse_duplication),
    (RepairStrategy::BraceBalance, balance_braces),
    (RepairStrategy::EscapedKeyBrace, fix_escaped_key_brace),
];

/// Repair near-valid argument text, best effort.
///
/// Equivalent to [`repair_with_outcome`] without the diagnostic outcome.
pub fn repair(args: &str) -> String {
    repair_with_outcome(args).0
}

/// Repair near-valid argument text and report which strategy applied.
///
/// Total: never panics, and an unrepairable input is returned unchanged so
/// callers can still attempt a downstream parse.
pub fn repair_with_outcome(args: &str) -> (String, RepairOutcome) {
    if args.trim().is_empty() {
        return (
            "{}".to_string(),
            RepairOutcome::Repaired(RepairStrategy::EmptyInput),
        );
    }

    if is_valid_json(args) {
        return (args.to_string(), RepairOutcome::AlreadyValid);
    }

    for (strategy, fix) in STRATEGIES {
        if let Some(candidate) = fix(args)
            && candidate != args
            && is_valid_json(&candidate)
        {
            return (candidate, RepairOutcome::Repaired(*strategy));
        }
    }

    (args.to_string(), RepairOutcome::Unrepaired)
}

/// Rewrite garbled boolean literal runs outside of string positions.
///
/// A run like `fffalsee` (duplicated/inserted characters around `false`)
/// becomes `false`; likewise `ttruee` becomes `true`. String contents are
/// left untouched.
fn fix_broken_booleans(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut changed = false;
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        if c == '"' {
            in_string = true;
            out.push(c);
            i += 1;
            continue;
        }

        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let run: String = chars[start..i].iter().collect();
            match garbled_literal(&run) {
                Some(literal) => {
                    out.push_str(literal);
                    changed = true;
                }
                None => out.push_str(&run),
            }
            continue;
        }

        out.push(c);
        i += 1;
    }

    changed.then_some(out)
}

/// Recognize a garbled boolean token: correct leading letter, the literal's
/// tail present somewhere in the run, and no foreign characters.
fn garbled_literal(run: &str) -> Option<&'static str> {
    if run == "false" || run == "true" || run == "null" {
        return None;
    }
    if run.starts_with('f') && run.contains("alse") && run.chars().all(|c| "false".contains(c)) {
        return Some("false");
    }
    if run.starts_with('t') && run.contains("rue") && run.chars().all(|c| "true".contains(c)) {
        return Some("true");
    }
    None
}

/// Targeted fallback for the single most common corruption seen in the wild:
/// `"key": f+alse+` directly before `,` or `}`.
fn fix_false_by_regex(text: &str) -> Option<String> {
    let re = Regex::new(r#""([^"]+)"\s*:\s*f+alse+\s*([,}])"#).ok()?;
    if !re.is_match(text) {
        return None;
    }
    Some(re.replace_all(text, "\"${1}\": false${2}").to_string())
}

fn collapse_duplication(text: &str) -> Option<String> {
    let collapsed = collapse_duplicated_fragment(text);
    (collapsed != text).then_some(collapsed)
}

/// Append missing `}` or prepend missing `{` according to the raw brace
/// count. Braces inside strings are deliberately counted too, matching the
/// observed provider corruption this targets (truncated tails).
fn balance_braces(text: &str) -> Option<String> {
    let opens = text.matches('{').count();
    let closes = text.matches('}').count();

    if opens > closes {
        let mut fixed = text.to_string();
        fixed.push_str(&"}".repeat(opens - closes));
        Some(fixed)
    } else if closes > opens {
        let mut fixed = "{".repeat(closes - opens);
        fixed.push_str(text);
        Some(fixed)
    } else {
        None
    }
}

/// Normalize the one malformed key-opening pattern `":\{` seen from providers
/// that double-escape nested objects.
fn fix_escaped_key_brace(text: &str) -> Option<String> {
    const MALFORMED: &str = "\":\\{";
    if !text.contains(MALFORMED) {
        return None;
    }
    Some(text.replace(MALFORMED, "\":{"))
}
