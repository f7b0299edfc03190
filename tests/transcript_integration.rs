//! Integration tests against transcript files on disk

use std::io::Write;
use std::path::Path;

use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::NamedTempFile;

use promptload::core::Analyzer;
use promptload::types::Rating;

fn write_transcript(records: &[serde_json::Value]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    for record in records {
        writeln!(file, "{}", record).expect("write record");
    }
    file.flush().expect("flush");
    file
}

#[test]
fn test_analyze_transcript_file() {
    let file = write_transcript(&[
        json!({"role": "system", "content": "You must always follow these rules. Never break them. This is critical."}),
        json!({"role": "user", "content": "Do this task."}),
    ]);
    let result = Analyzer::new().analyze_path(file.path(), 25_000);

    assert!(result.instruction_count > 0);
    assert!(result.density > 0.0);
    assert!(result.estimated_accuracy <= 98.0);
    assert_eq!(result.stats.total_messages, 2);
}

#[test]
fn test_missing_file_degrades_gracefully() {
    let result = Analyzer::new().analyze_path(Path::new("/nonexistent/path.jsonl"), 0);
    assert_eq!(result.instruction_count, 0);
    assert_eq!(result.estimated_accuracy, 98.0);
    assert_eq!(result.rating, Rating::Excellent);
    assert_eq!(result.stats.total_messages, 0);
}

#[test]
fn test_empty_file_degrades_gracefully() {
    let file = write_transcript(&[]);
    let result = Analyzer::new().analyze_path(file.path(), 0);
    assert_eq!(result.instruction_count, 0);
    assert_eq!(result.estimated_accuracy, 98.0);
    assert_eq!(result.rating, Rating::Excellent);
}

#[test]
fn test_nested_transcript_file() {
    let file = write_transcript(&[
        json!({"message": {"role": "user", "content": "You must do this."}, "type": "message"}),
        json!({"message": {"role": "assistant", "content": "OK, you should see it done."}, "type": "message"}),
    ]);
    let result = Analyzer::new().analyze_path(file.path(), 0);

    // assistant text does not contribute instruction load
    assert_eq!(result.instruction_count, 1);
    assert_eq!(result.stats.user_messages, 1);
    assert_eq!(result.stats.assistant_messages, 1);
}

#[test]
fn test_malformed_lines_do_not_abort_the_file() {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, "{{ this is not json").expect("write");
    writeln!(file, "{}", json!({"role": "user", "content": "You must comply."})).expect("write");
    writeln!(file).expect("write");
    writeln!(file, "{}", json!({"role": "user", "content": "Always."})).expect("write");
    file.flush().expect("flush");

    let result = Analyzer::new().analyze_path(file.path(), 0);
    assert_eq!(result.stats.total_messages, 2);
    assert_eq!(result.instruction_count, 2);
}

#[test]
fn test_tool_results_contribute_instructions() {
    let file = write_transcript(&[
        json!({"role": "user", "content": [
            {"type": "text", "text": "Run the linter."},
            {"type": "tool_result", "content": "warning: you must fix these 3 issues"}
        ]}),
        json!({"role": "assistant", "content": "Done."}),
    ]);
    let result = Analyzer::new().analyze_path(file.path(), 0);

    assert_eq!(result.stats.tool_results, 1);
    // "must" inside the tool result is counted
    assert_eq!(result.instruction_count, 1);
}

#[test]
fn test_code_heavy_transcript_keeps_high_accuracy() {
    let code = "fn hello_world() {\n    println!(\"Hello, World!\");\n}\n\n\
        fn calculate_sum(a: i32, b: i32) -> i32 {\n    a + b\n}\n"
        .repeat(20);
    let file = write_transcript(&[
        json!({"role": "user", "content": code}),
        json!({"role": "assistant", "content": "Looks fine."}),
    ]);
    let result = Analyzer::new().analyze_path(file.path(), 0);

    assert!(result.density < 1.0);
    assert!(result.estimated_accuracy > 90.0);
}

#[test]
fn test_repeated_runs_are_independent() {
    let file = write_transcript(&[
        json!({"role": "system", "content": "You must never fail. This is critical."}),
        json!({"role": "user", "content": "Proceed."}),
    ]);
    let analyzer = Analyzer::new();
    let first = analyzer.analyze_path(file.path(), 0);
    let second = analyzer.analyze_path(file.path(), 0);

    assert_eq!(first.instruction_count, second.instruction_count);
    assert_eq!(first.estimated_accuracy, second.estimated_accuracy);
    assert_eq!(first.breakdown, second.breakdown);
    assert_eq!(first.stats, second.stats);
}
