use std::fs;

use clap::Parser;
use fcprep_cli::{parse_conversations, run, Cli, RunSummary};
use fcprep_core::ConvertError;
use serde_json::{json, Value};

const DATASET: &str = concat!(
    r#"{"messages":[{"role":"system","content":"Weather bot. <tool_list>[{\"name\":\"get_weather\",\"description\":\"Weather\",\"parameters\":{\"type\":\"object\"}}]</tool_list>"},{"role":"user","content":"Paris?"},{"role":"assistant","content":"<tool_call>[{\"id\":\"1\",\"name\":\"get_weather\",\"arguments\":{\"city\":\"Paris\"}}]</tool_call>"},{"role":"user","content":"<tool_result><id>1</id><name>get_weather</name><content>22C</content></tool_result>"},{"role":"assistant","content":"22C."}]}"#,
    "\n\n",
    r#"{"messages":[{"role":"system","content":"plain"},{"role":"user","content":"hi"},{"role":"assistant","content":"hello"}]}"#,
    "\n",
);

fn read_jsonl(path: &std::path::Path) -> Vec<Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn run_converts_jsonl_to_structured_records() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("test.jsonl");
    let output = dir.path().join("out.jsonl");
    fs::write(&input, DATASET).unwrap();

    let cli = Cli::try_parse_from([
        "fcprep",
        "--input",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--format",
        "openai",
    ])
    .unwrap();
    let summary = run(&cli).unwrap();
    assert_eq!(summary, RunSummary { read: 2, written: 2 });

    let records = read_jsonl(&output);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["tools"][0]["function"]["name"], "get_weather");
    assert_eq!(
        records[0]["messages"][3],
        json!({"role": "tool", "tool_call_id": "1", "name": "get_weather", "content": "22C"})
    );
    assert_eq!(
        records[0]["messages"][2]["tool_calls"][0]["function"]["arguments"],
        json!({"city": "Paris"})
    );
    assert!(records[1].get("tools").is_none());
}

#[test]
fn run_reads_tags_file_and_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("test.json");
    let output = dir.path().join("out.jsonl");
    let tags = dir.path().join("tags.json");

    fs::write(
        &tags,
        json!({
            "tool_call": {"start": "[CALLS]", "end": "[/CALLS]"},
            "tool_result": {"start": "[RESULT]", "end": "[/RESULT]"},
            "tool_list": {"start": "[TOOLS]", "end": "[/TOOLS]"}
        })
        .to_string(),
    )
    .unwrap();
    fs::write(
        &input,
        json!([{
            "messages": [
                {"role": "system", "content": "s"},
                {"role": "assistant", "content": "[CALLS][{\"id\":\"9\",\"name\":\"f\",\"arguments\":{}}][/CALLS]"}
            ]
        }])
        .to_string(),
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "fcprep",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "-f",
        "tagged",
        "--tags-file",
        tags.to_str().unwrap(),
    ])
    .unwrap();
    run(&cli).unwrap();

    let records = read_jsonl(&output);
    assert_eq!(records[0]["messages"][1]["tool_calls"][0]["id"], "9");
    assert_eq!(records[0]["messages"][0]["content"], "s");
}

#[test]
fn run_rejects_unknown_format_before_reading_input() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist.jsonl");

    let cli = Cli::try_parse_from([
        "fcprep",
        "--input",
        missing.to_str().unwrap(),
        "--format",
        "CSV",
    ])
    .unwrap();
    let err = run(&cli).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConvertError>(),
        Some(ConvertError::UnsupportedFormat(name)) if name == "CSV"
    ));
}

#[test]
fn run_fails_on_malformed_record_unless_skipping() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("test.jsonl");
    let output = dir.path().join("out.jsonl");
    let dataset = format!(
        "{}\n{}\n",
        r#"{"messages":[{"role":"developer","content":"x"}]}"#,
        r#"{"messages":[{"role":"system","content":"s"},{"role":"user","content":"hi"}]}"#,
    );
    fs::write(&input, dataset).unwrap();

    let base = [
        "fcprep",
        "--input",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--format",
        "structured",
    ];

    let strict = Cli::try_parse_from(base).unwrap();
    let err = run(&strict).unwrap_err();
    let convert_err = err.downcast_ref::<ConvertError>().unwrap();
    assert!(matches!(
        convert_err.root(),
        ConvertError::MissingSystemMessage { .. }
    ));

    let lenient = Cli::try_parse_from(base.iter().copied().chain(["--skip-invalid"])).unwrap();
    let summary = run(&lenient).unwrap();
    assert_eq!(summary, RunSummary { read: 2, written: 1 });
    assert_eq!(read_jsonl(&output).len(), 1);
}

#[test]
fn invalid_delimiters_are_config_errors() {
    let cli = Cli::try_parse_from([
        "fcprep",
        "--format",
        "tagged",
        "--tool-call-start",
        "|",
        "--tool-call-end",
        "|",
    ])
    .unwrap();
    let err = cli.conversion_config().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConvertError>(),
        Some(ConvertError::InvalidConfig(_))
    ));
}

#[test]
fn parse_conversations_reports_line_numbers() {
    let err = parse_conversations("{\"messages\": []}\n\nnot json\n").unwrap_err();
    assert_eq!(err.to_string(), "invalid record on line 3");
}
