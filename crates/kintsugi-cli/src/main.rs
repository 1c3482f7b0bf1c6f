// kintsugi: command-line frontend for kintsugi-core
// Reads argument text from stdin, repairs/merges/classifies, writes stdout

mod cli;

use clap::Parser;
use kintsugi_core::{
    ToolCallCollector, ToolCallFragment, classify, fallback_query_from_history, is_valid_json,
    repair_with_outcome,
};
use serde_json::Value;
use std::fs;
use std::io::{self, ErrorKind, Read};

fn main() -> io::Result<()> {
    let args = cli::Cli::parse();

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    if args.classify {
        return run_classify(&input);
    }

    let (output, label, parse_error) = match &args.tool {
        Some(name) => run_merge(name, &input, args.history.as_deref())?,
        None => {
            let (output, outcome) = repair_with_outcome(&input);
            (output, outcome.label().to_string(), None)
        }
    };

    if args.verbose {
        eprintln!("[repair: {}]", label);
        if let Some(message) = &parse_error {
            eprintln!("[parse error: {}]", message);
        }
    }

    let valid = is_valid_json(&output);
    if !args.check {
        println!("{}", output);
    }
    if !valid {
        std::process::exit(1);
    }
    Ok(())
}

/// Classify stdin as a provider error value and print the verdict as JSON.
fn run_classify(input: &str) -> io::Result<()> {
    let trimmed = input.trim();
    let value: Value = serde_json::from_str(trimmed)
        .unwrap_or_else(|_| Value::String(trimmed.to_string()));

    let classified = classify(&value);
    let line = serde_json::to_string(&classified).map_err(io::Error::other)?;
    println!("{}", line);
    Ok(())
}

/// Fold stdin lines through the fragment collector for one tool call.
fn run_merge(
    tool_name: &str,
    input: &str,
    history_path: Option<&std::path::Path>,
) -> io::Result<(String, String, Option<String>)> {
    let history: Vec<Value> = match history_path {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?).map_err(|e| {
            io::Error::new(
                ErrorKind::InvalidInput,
                format!("Invalid history file '{}': {}", path.display(), e),
            )
        })?,
        None => Vec::new(),
    };

    let mut collector = ToolCallCollector::new();
    collector.start(0, String::new(), tool_name.to_string());

    for line in input.lines() {
        collector.append(
            0,
            ToolCallFragment {
                tool_name: None,
                text: line.to_string(),
            },
            || fallback_query_from_history(&history),
        );
    }

    let mut calls = collector.finish();
    let call = calls.remove(0);
    Ok((call.arguments, call.outcome.label().to_string(), call.parse_error))
}
