//! CLI argument parsing with clap.

use clap::Parser;
use std::path::PathBuf;

/// kintsugi - repair and reconcile streamed tool-call argument JSON
#[derive(Parser, Debug)]
#[command(
    name = "kintsugi",
    version,
    about = "Repair and reconcile streamed tool-call argument JSON",
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Treat each input line as one streamed fragment for this tool,
    /// merge them in order, then repair the accumulated text
    #[arg(short = 't', long = "tool", value_name = "NAME")]
    pub tool: Option<String>,

    /// Classify input as a provider error value instead of repairing
    /// (non-JSON input is treated as a bare message string)
    #[arg(long = "classify", conflicts_with_all = ["tool", "check"])]
    pub classify: bool,

    /// Chat history file (JSON array of messages) backing the
    /// search-query fallback in --tool mode
    #[arg(long = "history", value_name = "FILE", requires = "tool")]
    pub history: Option<PathBuf>,

    /// Validate only: print nothing, report validity via exit status
    #[arg(long = "check")]
    pub check: bool,

    /// Print repair diagnostics to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

const AFTER_HELP: &str = "\
Input is read from stdin. The repaired text goes to stdout; the exit status
is 0 when the result is valid JSON and 1 otherwise.

Examples:
  echo '{\"a\": fffalsee}' | kintsugi
  printf '{\"query\":\"cats\"}\\n{\"query\":\"cats\"}\\n' | kintsugi --tool web_search
  echo '{\"code\":\"ECONNRESET\"}' | kintsugi --classify";
