use std::path::PathBuf;

use clap::Parser;

/// Convert tagged tool-calling conversations into evaluation-ready records.
#[derive(Parser, Debug, Clone)]
#[command(name = "fcprep", version, about)]
pub struct Cli {
    /// Input dataset: a JSON array or JSON Lines of `{"messages": [...]}`. `-` reads stdin.
    #[arg(short, long, env = "FCPREP_INPUT", default_value = "-")]
    pub input: PathBuf,

    /// Output JSON Lines file. `-` writes stdout.
    #[arg(short, long, env = "FCPREP_OUTPUT", default_value = "-")]
    pub output: PathBuf,

    /// Target format: `tagged` (alias `anyscale`) or `structured` (alias `openai`).
    #[arg(short, long, env = "FCPREP_FORMAT")]
    pub format: String,

    #[arg(long, env = "FCPREP_TOOL_CALL_START", default_value = "<tool_call>")]
    pub tool_call_start: String,
    #[arg(long, env = "FCPREP_TOOL_CALL_END", default_value = "</tool_call>")]
    pub tool_call_end: String,

    #[arg(long, env = "FCPREP_TOOL_RESULT_START", default_value = "<tool_result>")]
    pub tool_result_start: String,
    #[arg(long, env = "FCPREP_TOOL_RESULT_END", default_value = "</tool_result>")]
    pub tool_result_end: String,

    #[arg(long, env = "FCPREP_TOOL_LIST_START", default_value = "<tool_list>")]
    pub tool_list_start: String,
    #[arg(long, env = "FCPREP_TOOL_LIST_END", default_value = "</tool_list>")]
    pub tool_list_end: String,

    /// JSON file with `tool_call`, `tool_result` and `tool_list` delimiter pairs.
    /// Overrides the individual delimiter flags.
    #[arg(long, env = "FCPREP_TAGS_FILE")]
    pub tags_file: Option<PathBuf>,

    /// Instruction that replaces the system prompt for the structured target.
    #[arg(long, env = "FCPREP_SYSTEM_PROMPT")]
    pub system_prompt: Option<String>,

    /// Log and drop malformed records instead of failing the whole dataset.
    #[arg(long, env = "FCPREP_SKIP_INVALID")]
    pub skip_invalid: bool,
}
