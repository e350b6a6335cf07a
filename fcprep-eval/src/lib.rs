//! Conversion of tagged tool-calling conversations into evaluation-ready records.
//!
//! ```
//! use fcprep_core::{Conversation, DatasetFormat, IndicatorTags, TaggedMessage};
//! use fcprep_eval::{convert, ConversionConfig};
//!
//! let config = ConversionConfig::builder()
//!     .tool_call_tags(IndicatorTags::new("<tool_call>", "</tool_call>"))
//!     .tool_result_tags(IndicatorTags::new("<tool_result>", "</tool_result>"))
//!     .tool_list_tags(IndicatorTags::new("<tool_list>", "</tool_list>"))
//!     .build()
//!     .unwrap();
//!
//! let conversation = Conversation::new(vec![
//!     TaggedMessage::new("system", "Be brief."),
//!     TaggedMessage::new("user", "Weather in Paris?"),
//!     TaggedMessage::new(
//!         "assistant",
//!         r#"<tool_call>[{"id":"1","name":"get_weather","arguments":{"city":"Paris"}}]</tool_call>"#,
//!     ),
//! ]);
//!
//! let records = convert(vec![conversation], &config, DatasetFormat::Structured).unwrap();
//! assert_eq!(records[0].messages[2].tool_calls().unwrap()[0].name, "get_weather");
//! ```

mod batch;
mod config;
mod converter;
mod transform;

pub use batch::{convert, convert_named, BatchConverter};
pub use config::{ConversionConfig, ConversionConfigBuilder, ErrorPolicy, DEFAULT_SYSTEM_PROMPT};
pub use converter::{ConversationConverter, FormatConverter, StructuredConverter, TaggedConverter};
pub use transform::to_structured;
