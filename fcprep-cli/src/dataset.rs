use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use anyhow::Context;
use fcprep_core::{Conversation, ConvertedRecord};

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Reads conversations from a JSON array or from JSON Lines; blank lines are skipped.
pub fn read_conversations(path: &Path) -> anyhow::Result<Vec<Conversation>> {
    let raw = if is_stdio(path) {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read dataset from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read dataset '{}'", path.display()))?
    };
    parse_conversations(&raw)
}

pub fn parse_conversations(raw: &str) -> anyhow::Result<Vec<Conversation>> {
    if raw.trim_start().starts_with('[') {
        return serde_json::from_str(raw).context("dataset is not a valid JSON array of records");
    }

    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(number, line)| {
            serde_json::from_str::<Conversation>(line)
                .with_context(|| format!("invalid record on line {}", number + 1))
        })
        .collect()
}

/// Writes one record per line.
pub fn write_records(path: &Path, records: &[ConvertedRecord]) -> anyhow::Result<()> {
    if is_stdio(path) {
        let stdout = io::stdout();
        return write_jsonl(stdout.lock(), records).context("failed to write records to stdout");
    }

    let file = fs::File::create(path)
        .with_context(|| format!("failed to create output '{}'", path.display()))?;
    write_jsonl(BufWriter::new(file), records)
        .with_context(|| format!("failed to write records to '{}'", path.display()))
}

fn write_jsonl<W: Write>(mut writer: W, records: &[ConvertedRecord]) -> anyhow::Result<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
