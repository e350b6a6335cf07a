use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::{ConvertError, IndicatorTags, TagKind, ToolCall, ToolDefinition, Value};

/// Failure to read the interior of a block.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct CodecError(pub String);

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError(err.to_string())
    }
}

/// The grammar of what lives between a start and end tag, for one block kind.
///
/// `parse` reads the interior text; `render` writes it back so that
/// `parse(render(x)) == x`.
pub trait BlockCodec: Send + Sync {
    type Output;

    const KIND: TagKind;

    fn parse(&self, interior: &str) -> Result<Self::Output, CodecError>;

    fn render(&self, value: &Self::Output) -> Result<String, ConvertError>;
}

/// JSON list of `{"id", "name", "arguments"}`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ToolCallCodec;

#[derive(Deserialize, Serialize)]
struct TaggedToolCall {
    id: String,
    name: String,
    #[serde(default = "empty_arguments", deserialize_with = "object_or_json_string")]
    arguments: Value,
}

fn empty_arguments() -> Value {
    Value::Object(Default::default())
}

// Some datasets store arguments as an encoded JSON string.
fn object_or_json_string<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(raw) => serde_json::from_str(&raw).map_err(serde::de::Error::custom),
        other => Ok(other),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

impl BlockCodec for ToolCallCodec {
    type Output = Vec<ToolCall>;

    const KIND: TagKind = TagKind::ToolCall;

    fn parse(&self, interior: &str) -> Result<Self::Output, CodecError> {
        let calls: OneOrMany<TaggedToolCall> = serde_json::from_str(interior.trim())?;
        Ok(calls
            .into_vec()
            .into_iter()
            .map(|call| ToolCall {
                id: call.id,
                name: call.name,
                arguments: call.arguments,
            })
            .collect())
    }

    fn render(&self, value: &Self::Output) -> Result<String, ConvertError> {
        let calls: Vec<TaggedToolCall> = value
            .iter()
            .map(|call| {
                // `parse` decodes string arguments, so strings are written encoded once more.
                let arguments = match &call.arguments {
                    Value::String(raw) => Value::String(serde_json::to_string(raw)?),
                    other => other.clone(),
                };
                Ok(TaggedToolCall {
                    id: call.id.clone(),
                    name: call.name.clone(),
                    arguments,
                })
            })
            .collect::<Result<_, serde_json::Error>>()?;
        Ok(serde_json::to_string(&calls)?)
    }
}

/// Fields of a tool result block.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ToolResult {
    #[serde(alias = "id")]
    pub tool_call_id: String,
    pub name: String,
    pub content: String,
}

/// `<id>..</id><name>..</name><content>..</content>`, or the same fields as a JSON object.
#[derive(Clone, Debug)]
pub struct ToolResultCodec {
    id_tags: IndicatorTags,
    name_tags: IndicatorTags,
    content_tags: IndicatorTags,
}

impl Default for ToolResultCodec {
    fn default() -> Self {
        Self {
            id_tags: IndicatorTags::new("<id>", "</id>"),
            name_tags: IndicatorTags::new("<name>", "</name>"),
            content_tags: IndicatorTags::new("<content>", "</content>"),
        }
    }
}

impl ToolResultCodec {
    /// Reads the `id`, `name` and `content` fields in any order. Scanning resumes after
    /// each field's end tag, so tag-like text inside a field value is never taken for
    /// another field.
    fn fields<'a>(&self, interior: &'a str) -> Result<[&'a str; 3], CodecError> {
        let tags = [
            (&self.id_tags, "id"),
            (&self.name_tags, "name"),
            (&self.content_tags, "content"),
        ];
        let mut values: [Option<&'a str>; 3] = [None; 3];
        let mut cursor = 0;

        loop {
            let rest = &interior[cursor..];
            let next = tags
                .iter()
                .enumerate()
                .filter_map(|(slot, (field_tags, _))| {
                    rest.find(field_tags.start.as_str()).map(|at| (at, slot))
                })
                .min();
            let Some((at, slot)) = next else {
                break;
            };

            let (field_tags, field) = tags[slot];
            let inner_start = cursor + at + field_tags.start.len();
            let Some(len) = interior[inner_start..].find(field_tags.end.as_str()) else {
                return Err(CodecError(format!("unterminated field '{field}'")));
            };
            if values[slot].is_some() {
                return Err(CodecError(format!("duplicate field '{field}'")));
            }
            values[slot] = Some(interior[inner_start..inner_start + len].trim());
            cursor = inner_start + len + field_tags.end.len();
        }

        let mut out = [""; 3];
        for (slot, (_, field)) in tags.iter().enumerate() {
            out[slot] = values[slot].ok_or_else(|| CodecError(format!("missing field '{field}'")))?;
        }
        Ok(out)
    }
}

impl BlockCodec for ToolResultCodec {
    type Output = ToolResult;

    const KIND: TagKind = TagKind::ToolResult;

    fn parse(&self, interior: &str) -> Result<Self::Output, CodecError> {
        let trimmed = interior.trim();
        if trimmed.starts_with('{') {
            return Ok(serde_json::from_str(trimmed)?);
        }

        let [tool_call_id, name, content] = self.fields(trimmed)?;
        Ok(ToolResult {
            tool_call_id: tool_call_id.to_string(),
            name: name.to_string(),
            content: content.to_string(),
        })
    }

    fn render(&self, value: &Self::Output) -> Result<String, ConvertError> {
        Ok(format!(
            "{}{}{}",
            self.id_tags.wrap(&value.tool_call_id),
            self.name_tags.wrap(&value.name),
            self.content_tags.wrap(&value.content),
        ))
    }
}

/// JSON list of tool definitions, flat or `{"type": "function", "function": {...}}` wrapped.
#[derive(Clone, Copy, Debug, Default)]
pub struct ToolListCodec;

impl BlockCodec for ToolListCodec {
    type Output = Vec<ToolDefinition>;

    const KIND: TagKind = TagKind::ToolList;

    fn parse(&self, interior: &str) -> Result<Self::Output, CodecError> {
        let tools: OneOrMany<ToolDefinition> = serde_json::from_str(interior.trim())?;
        Ok(tools.into_vec())
    }

    fn render(&self, value: &Self::Output) -> Result<String, ConvertError> {
        Ok(serde_json::to_string(value)?)
    }
}
