use fcprep_core::{ConvertError, IndicatorTags};

/// Instruction that replaces the system prompt in structured-target output.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// What the batch driver does with a record that fails to convert.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// The first failing record fails the whole batch.
    #[default]
    Abort,
    /// Failing records are logged at `warn` and left out of the output.
    SkipAndLog,
}

/// Delimiters and options shared by every conversion of a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionConfig {
    tool_call_tags: IndicatorTags,
    tool_result_tags: IndicatorTags,
    tool_list_tags: IndicatorTags,
    system_prompt: String,
    error_policy: ErrorPolicy,
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::new()
    }

    pub fn tool_call_tags(&self) -> &IndicatorTags {
        &self.tool_call_tags
    }

    pub fn tool_result_tags(&self) -> &IndicatorTags {
        &self.tool_result_tags
    }

    pub fn tool_list_tags(&self) -> &IndicatorTags {
        &self.tool_list_tags
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConversionConfigBuilder {
    tool_call_tags: Option<IndicatorTags>,
    tool_result_tags: Option<IndicatorTags>,
    tool_list_tags: Option<IndicatorTags>,
    system_prompt: Option<String>,
    error_policy: ErrorPolicy,
}

impl ConversionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool_call_tags(mut self, tags: IndicatorTags) -> Self {
        self.tool_call_tags = Some(tags);
        self
    }

    pub fn tool_result_tags(mut self, tags: IndicatorTags) -> Self {
        self.tool_result_tags = Some(tags);
        self
    }

    pub fn tool_list_tags(mut self, tags: IndicatorTags) -> Self {
        self.tool_list_tags = Some(tags);
        self
    }

    pub fn system_prompt(mut self, value: impl Into<String>) -> Self {
        self.system_prompt = Some(value.into());
        self
    }

    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn build(self) -> Result<ConversionConfig, ConvertError> {
        let tool_call_tags = require_tags(self.tool_call_tags, "tool_call_tags")?;
        let tool_result_tags = require_tags(self.tool_result_tags, "tool_result_tags")?;
        let tool_list_tags = require_tags(self.tool_list_tags, "tool_list_tags")?;

        let named = [
            ("tool_call_tags", &tool_call_tags),
            ("tool_result_tags", &tool_result_tags),
            ("tool_list_tags", &tool_list_tags),
        ];
        for (name, tags) in named {
            for (other_name, other) in named {
                if name != other_name && other.start.contains(tags.start.as_str()) {
                    tracing::warn!(
                        tags = name,
                        other = other_name,
                        start = %tags.start,
                        "start tag also occurs inside another start tag; blocks may be misattributed"
                    );
                }
            }
        }

        Ok(ConversionConfig {
            tool_call_tags,
            tool_result_tags,
            tool_list_tags,
            system_prompt: self
                .system_prompt
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            error_policy: self.error_policy,
        })
    }
}

fn require_tags(tags: Option<IndicatorTags>, name: &str) -> Result<IndicatorTags, ConvertError> {
    let tags = tags.ok_or_else(|| ConvertError::InvalidConfig(format!("{name} is required")))?;
    if tags.start.trim().is_empty() || tags.end.trim().is_empty() {
        return Err(ConvertError::InvalidConfig(format!(
            "{name} cannot have an empty delimiter"
        )));
    }
    if tags.start == tags.end {
        return Err(ConvertError::InvalidConfig(format!(
            "{name} start and end delimiters must differ"
        )));
    }
    Ok(tags)
}
