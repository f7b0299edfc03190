//! promptload CLI
//!
//! Usage:
//!   promptload transcript.jsonl              # status line summary
//!   promptload transcript.jsonl --json       # full JSON report
//!   promptload transcript.jsonl --verbose    # per-category breakdown
//!   promptload --status-line < status.json   # transcript path from stdin JSON

use clap::Parser;
use std::io::Read;
use std::path::Path;

use promptload::core::Analyzer;
use promptload::types::{AnalysisResult, DirectiveCategory};
use promptload::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "promptload",
    version = VERSION,
    about = "Estimate LLM instruction-following degradation from a transcript",
    long_about = "Promptload scans a JSONL conversation transcript for directive\n\
                  language (must / never / always / ensure / important ...) and\n\
                  estimates how much instruction-following accuracy may degrade\n\
                  under that load.\n\n\
                  Ratings:\n  \
                  excellent  >= 95%\n  \
                  good       85-95%\n  \
                  moderate   75-85%\n  \
                  degraded   65-75%\n  \
                  poor       <  65%"
)]
struct Args {
    /// Path to a JSONL transcript (reads the path from stdin when omitted)
    transcript: Option<String>,

    /// Output the full analysis as JSON
    #[arg(long)]
    json: bool,

    /// Compact status line format
    #[arg(long)]
    compact: bool,

    /// Read a status-line JSON object ({"transcript_path": ...}) from stdin
    #[arg(long)]
    status_line: bool,

    /// Total input tokens, for the context-size penalty
    #[arg(long, default_value_t = 0)]
    context_tokens: i64,

    /// Show the full category breakdown
    #[arg(short, long)]
    verbose: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,
}

/// Status-line request read from stdin
#[derive(serde::Deserialize, Default)]
struct StatusLineRequest {
    transcript_path: Option<String>,
    #[serde(default)]
    context_window: ContextWindow,
}

#[derive(serde::Deserialize, Default)]
struct ContextWindow {
    #[serde(default)]
    total_input_tokens: i64,
}

fn main() {
    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let (transcript_path, context_tokens) = resolve_input(&args);

    let analyzer = Analyzer::new();
    let result = match transcript_path {
        Some(path) => analyzer.analyze_path(Path::new(&path), context_tokens),
        None => analyzer.analyze_raw("", context_tokens),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.rounded()).unwrap());
    } else if args.verbose {
        print_report(&result);
    } else {
        println!("{}", result.to_status_line(args.compact));
    }
}

/// Determine the transcript path and token count from the arguments or stdin
fn resolve_input(args: &Args) -> (Option<String>, i64) {
    if args.status_line {
        let mut buf = String::new();
        if std::io::stdin().read_to_string(&mut buf).is_err() {
            return (None, args.context_tokens);
        }
        match serde_json::from_str::<StatusLineRequest>(&buf) {
            Ok(request) => (request.transcript_path, request.context_window.total_input_tokens),
            Err(_) => (None, args.context_tokens),
        }
    } else if let Some(ref path) = args.transcript {
        (Some(path.clone()), args.context_tokens)
    } else {
        // bare stdin fallback: the path as plain text
        let mut buf = String::new();
        match std::io::stdin().read_to_string(&mut buf) {
            Ok(_) if !buf.trim().is_empty() => (Some(buf.trim().to_string()), args.context_tokens),
            _ => (None, args.context_tokens),
        }
    }
}

/// Print the full human-readable report
fn print_report(result: &AnalysisResult) {
    let r = result.rounded();

    let line = |text: String| println!("{}", result.paint(&text));

    line("┌───────────────────────────────────────────┐".to_string());
    line(format!(
        "│ Instructions: {}  ({:.2} per 1k chars)",
        r.instruction_count, r.density
    ));
    line(format!(
        "│ Estimated Accuracy: {:.1}% ({})",
        r.estimated_accuracy, r.rating
    ));
    line("├───────────────────────────────────────────┤".to_string());
    line("│ Breakdown:".to_string());
    for category in DirectiveCategory::ALL {
        let count = r.breakdown.get(&category).copied().unwrap_or(0);
        line(format!("│   {:<18} {}", category.name(), count));
    }
    line("├───────────────────────────────────────────┤".to_string());
    line(format!(
        "│ Weighted: {:.1} | Position-weighted: {:.1}",
        r.weighted_count, r.position_weighted_count
    ));
    line(format!(
        "│ Penalties: instructions -{:.1} | context -{:.1}",
        r.factors.instruction_penalty, r.factors.context_penalty
    ));
    line(format!(
        "│ Messages: {} (sys {} / user {} / asst {} / tool {})",
        r.stats.total_messages,
        r.stats.system_messages,
        r.stats.user_messages,
        r.stats.assistant_messages,
        r.stats.tool_results
    ));
    line(format!("│ Characters: {}", r.stats.total_chars));
    line("└───────────────────────────────────────────┘".to_string());
}
