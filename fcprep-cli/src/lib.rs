//! Library side of the `fcprep` binary: option handling and dataset I/O.

mod args;
mod dataset;

use std::fs;
use std::path::Path;

use anyhow::Context;
use fcprep_core::IndicatorTags;
use fcprep_eval::{BatchConverter, ConversionConfig, ErrorPolicy};
use serde::Deserialize;

pub use args::Cli;
pub use dataset::{parse_conversations, read_conversations, write_records};

/// Delimiter pairs loaded from `--tags-file`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct TagsFile {
    pub tool_call: IndicatorTags,
    pub tool_result: IndicatorTags,
    pub tool_list: IndicatorTags,
}

impl TagsFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read tags file '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid tags file '{}'", path.display()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub read: usize,
    pub written: usize,
}

impl Cli {
    pub fn conversion_config(&self) -> anyhow::Result<ConversionConfig> {
        let tags = match &self.tags_file {
            Some(path) => TagsFile::load(path)?,
            None => TagsFile {
                tool_call: IndicatorTags::new(&self.tool_call_start, &self.tool_call_end),
                tool_result: IndicatorTags::new(&self.tool_result_start, &self.tool_result_end),
                tool_list: IndicatorTags::new(&self.tool_list_start, &self.tool_list_end),
            },
        };

        let mut builder = ConversionConfig::builder()
            .tool_call_tags(tags.tool_call)
            .tool_result_tags(tags.tool_result)
            .tool_list_tags(tags.tool_list)
            .error_policy(if self.skip_invalid {
                ErrorPolicy::SkipAndLog
            } else {
                ErrorPolicy::Abort
            });
        if let Some(prompt) = &self.system_prompt {
            builder = builder.system_prompt(prompt.as_str());
        }
        Ok(builder.build()?)
    }
}

/// Resolves the format and config, then converts `cli.input` into `cli.output`.
pub fn run(cli: &Cli) -> anyhow::Result<RunSummary> {
    let config = cli.conversion_config()?;
    let batch = BatchConverter::from_format_name(&cli.format, config)?;

    let conversations = read_conversations(&cli.input)?;
    let read = conversations.len();
    tracing::info!(records = read, format = %batch.format(), "converting dataset");

    let records = batch.convert(conversations)?;
    write_records(&cli.output, &records)?;

    let summary = RunSummary {
        read,
        written: records.len(),
    };
    if summary.written < summary.read {
        tracing::warn!(
            skipped = summary.read - summary.written,
            "some records were skipped"
        );
    }
    Ok(summary)
}
