//! Data model, errors and tag extraction for tool-calling conversation datasets.
//!
//! A conversation in the tagged encoding carries tool calls, tool results and tool
//! catalogs as delimiter-marked blocks inside message text. [`extract`] pulls one such
//! block out of a string and parses it with a [`BlockCodec`].

mod codec;
mod error;
mod format;
mod message;
mod tags;

pub use codec::{BlockCodec, CodecError, ToolCallCodec, ToolListCodec, ToolResult, ToolResultCodec};
pub use error::ConvertError;
pub use format::DatasetFormat;
pub use message::{
    Conversation, ConvertedRecord, Message, Role, TaggedMessage, ToolCall, ToolDefinition,
};
pub use tags::{encode, extract, BlockSpan, IndicatorTags, TagKind};

pub type Value = serde_json::Value;
