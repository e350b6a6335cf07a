use fcprep_core::{
    extract, Conversation, ConvertError, ConvertedRecord, DatasetFormat, Message, Role,
    TaggedMessage, ToolListCodec, ToolResultCodec,
};

use crate::{to_structured, ConversionConfig};

/// Rewrites one tagged conversation into the shape an evaluation client expects.
pub trait ConversationConverter: Send + Sync {
    fn convert(&self, conversation: &Conversation) -> Result<ConvertedRecord, ConvertError>;
}

fn require_system_first(conversation: &Conversation) -> Result<(), ConvertError> {
    match conversation.messages.first() {
        Some(first) if first.role() == Some(Role::System) => Ok(()),
        Some(first) => Err(ConvertError::MissingSystemMessage {
            found: Some(first.role.clone()),
        }),
        None => Err(ConvertError::MissingSystemMessage { found: None }),
    }
}

fn invalid_role(message: &TaggedMessage, index: usize) -> ConvertError {
    ConvertError::InvalidRole {
        role: message.role.clone(),
        index,
    }
}

/// Target that keeps the tagged encoding for system and user turns.
///
/// Only assistant turns are rewritten, so that expected tool calls can be compared
/// field by field. No tool catalog is extracted.
#[derive(Clone, Debug)]
pub struct TaggedConverter {
    config: ConversionConfig,
}

impl TaggedConverter {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }
}

impl ConversationConverter for TaggedConverter {
    fn convert(&self, conversation: &Conversation) -> Result<ConvertedRecord, ConvertError> {
        require_system_first(conversation)?;

        let mut messages = Vec::with_capacity(conversation.len());
        for (index, message) in conversation.messages.iter().enumerate() {
            let converted = match message.role() {
                Some(Role::System) => Message::system(message.content.as_str()),
                Some(Role::User) => Message::user(message.content.as_str()),
                Some(Role::Assistant) => {
                    to_structured(&message.content, self.config.tool_call_tags())
                        .map_err(|err| err.at_message(index))?
                }
                Some(Role::Tool) | None => return Err(invalid_role(message, index)),
            };
            messages.push(converted);
        }

        Ok(ConvertedRecord {
            messages,
            tools: Vec::new(),
        })
    }
}

/// Target that moves every embedded block into its dedicated field.
///
/// The tool catalog leaves the system prompt and becomes the record's `tools`; the
/// system prompt itself is replaced by the configured instruction. Tool result blocks
/// in user turns become `tool` messages.
#[derive(Clone, Debug)]
pub struct StructuredConverter {
    config: ConversionConfig,
    results: ToolResultCodec,
}

impl StructuredConverter {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            config,
            results: ToolResultCodec::default(),
        }
    }

    fn convert_user(&self, message: &TaggedMessage, index: usize) -> Result<Message, ConvertError> {
        let (residual, result) =
            extract(&message.content, self.config.tool_result_tags(), &self.results)
                .map_err(|err| err.at_message(index))?;

        let Some(result) = result else {
            return Ok(Message::user(residual));
        };
        if !residual.is_empty() {
            tracing::warn!(
                message_index = index,
                dropped = residual.len(),
                "discarding text outside the tool result block"
            );
        }
        Ok(Message::Tool {
            tool_call_id: result.tool_call_id,
            name: result.name,
            content: result.content,
        })
    }
}

impl ConversationConverter for StructuredConverter {
    fn convert(&self, conversation: &Conversation) -> Result<ConvertedRecord, ConvertError> {
        require_system_first(conversation)?;

        let system = &conversation.messages[0];
        let (_, tools) = extract(&system.content, self.config.tool_list_tags(), &ToolListCodec)
            .map_err(|err| err.at_message(0))?;

        let mut messages = Vec::with_capacity(conversation.len());
        messages.push(Message::system(self.config.system_prompt()));

        for (index, message) in conversation.messages.iter().enumerate().skip(1) {
            let converted = match message.role() {
                Some(Role::User) => self.convert_user(message, index)?,
                Some(Role::Assistant) => {
                    to_structured(&message.content, self.config.tool_call_tags())
                        .map_err(|err| err.at_message(index))?
                }
                Some(Role::System) | Some(Role::Tool) | None => {
                    return Err(invalid_role(message, index))
                }
            };
            messages.push(converted);
        }

        Ok(ConvertedRecord {
            messages,
            tools: tools.unwrap_or_default(),
        })
    }
}

/// The converter for one [`DatasetFormat`], chosen once per batch.
#[derive(Clone, Debug)]
pub enum FormatConverter {
    Tagged(TaggedConverter),
    Structured(StructuredConverter),
}

impl FormatConverter {
    pub fn for_format(format: DatasetFormat, config: ConversionConfig) -> Self {
        match format {
            DatasetFormat::Tagged => FormatConverter::Tagged(TaggedConverter::new(config)),
            DatasetFormat::Structured => {
                FormatConverter::Structured(StructuredConverter::new(config))
            }
        }
    }

    pub fn format(&self) -> DatasetFormat {
        match self {
            FormatConverter::Tagged(_) => DatasetFormat::Tagged,
            FormatConverter::Structured(_) => DatasetFormat::Structured,
        }
    }
}

impl ConversationConverter for FormatConverter {
    fn convert(&self, conversation: &Conversation) -> Result<ConvertedRecord, ConvertError> {
        match self {
            FormatConverter::Tagged(inner) => inner.convert(conversation),
            FormatConverter::Structured(inner) => inner.convert(conversation),
        }
    }
}
