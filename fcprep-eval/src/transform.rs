use fcprep_core::{extract, ConvertError, IndicatorTags, Message, ToolCallCodec};

/// Splits an assistant turn into free text and structured tool calls.
///
/// Every tool call block is extracted, in order of appearance, and the calls are
/// concatenated. Content without a tool call block is kept as-is with no tool calls.
pub fn to_structured(content: &str, tool_call_tags: &IndicatorTags) -> Result<Message, ConvertError> {
    let (mut content, mut tool_calls) = extract(content, tool_call_tags, &ToolCallCodec)?;
    while let Some(calls) = tool_calls.as_mut() {
        let (rest, more) = extract(&content, tool_call_tags, &ToolCallCodec)?;
        let Some(more) = more else {
            break;
        };
        calls.extend(more);
        content = rest;
    }
    Ok(Message::Assistant {
        content,
        tool_calls,
    })
}
