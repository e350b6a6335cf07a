use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{BlockCodec, ConvertError};

/// The kind of block a delimiter pair marks inside message content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    ToolCall,
    ToolResult,
    ToolList,
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagKind::ToolCall => f.write_str("tool call"),
            TagKind::ToolResult => f.write_str("tool result"),
            TagKind::ToolList => f.write_str("tool list"),
        }
    }
}

/// A literal `(start, end)` delimiter pair, e.g. `<tool_call>` / `</tool_call>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct IndicatorTags {
    pub start: String,
    pub end: String,
}

/// Byte offsets of one located block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockSpan {
    /// Offset of the start tag.
    pub outer_start: usize,
    /// Offset just past the end tag.
    pub outer_end: usize,
    pub inner_start: usize,
    pub inner_end: usize,
}

impl IndicatorTags {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn is_present_in(&self, content: &str) -> bool {
        content.contains(&self.start)
    }

    /// Surrounds `body` with this pair.
    pub fn wrap(&self, body: &str) -> String {
        let mut out = String::with_capacity(self.start.len() + body.len() + self.end.len());
        out.push_str(&self.start);
        out.push_str(body);
        out.push_str(&self.end);
        out
    }

    /// Finds the first block. `Ok(None)` when the start tag is absent; an error when the
    /// start tag has no end tag after it.
    pub fn locate(&self, content: &str, kind: TagKind) -> Result<Option<BlockSpan>, ConvertError> {
        let Some(outer_start) = content.find(&self.start) else {
            return Ok(None);
        };
        let inner_start = outer_start + self.start.len();
        let Some(offset) = content[inner_start..].find(&self.end) else {
            return Err(ConvertError::tag_parse(
                kind,
                &content[outer_start..],
                format!("missing end tag '{}'", self.end),
            ));
        };
        let inner_end = inner_start + offset;
        Ok(Some(BlockSpan {
            outer_start,
            outer_end: inner_end + self.end.len(),
            inner_start,
            inner_end,
        }))
    }
}

/// Removes the first `tags` block from `content` and parses its interior with `codec`.
///
/// Content without the start tag comes back unchanged with `None`; absence is not an error.
/// The residual is the text around the block, trimmed.
pub fn extract<C: BlockCodec>(
    content: &str,
    tags: &IndicatorTags,
    codec: &C,
) -> Result<(String, Option<C::Output>), ConvertError> {
    let Some(span) = tags.locate(content, C::KIND)? else {
        return Ok((content.to_string(), None));
    };

    let interior = &content[span.inner_start..span.inner_end];
    if interior.trim().is_empty() {
        return Err(ConvertError::tag_parse(
            C::KIND,
            &content[span.outer_start..span.outer_end],
            "block is empty",
        ));
    }

    let parsed = codec.parse(interior).map_err(|err| {
        ConvertError::tag_parse(
            C::KIND,
            &content[span.outer_start..span.outer_end],
            err.to_string(),
        )
    })?;

    let mut residual = String::with_capacity(content.len() - (span.outer_end - span.outer_start));
    residual.push_str(&content[..span.outer_start]);
    residual.push_str(&content[span.outer_end..]);
    Ok((residual.trim().to_string(), Some(parsed)))
}

/// Renders `value` with `codec` and wraps it in `tags`.
pub fn encode<C: BlockCodec>(
    value: &C::Output,
    tags: &IndicatorTags,
    codec: &C,
) -> Result<String, ConvertError> {
    Ok(tags.wrap(&codec.render(value)?))
}
