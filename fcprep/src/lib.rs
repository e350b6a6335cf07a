//! Facade over the fcprep crates.
//!
//! Enable the `parallel` feature to convert records on the rayon pool.

pub use fcprep_core;
pub use fcprep_eval;

pub mod prelude {
    pub use fcprep_core::{
        encode, extract, BlockCodec, Conversation, ConvertError, ConvertedRecord, DatasetFormat,
        IndicatorTags, Message, Role, TagKind, TaggedMessage, ToolCall, ToolCallCodec,
        ToolDefinition, ToolListCodec, ToolResult, ToolResultCodec,
    };
    pub use fcprep_eval::{
        convert, convert_named, to_structured, BatchConverter, ConversationConverter,
        ConversionConfig, ErrorPolicy, FormatConverter, StructuredConverter, TaggedConverter,
    };
}
