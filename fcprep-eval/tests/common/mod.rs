#![allow(dead_code)]

use fcprep_core::{Conversation, IndicatorTags, TaggedMessage};
use fcprep_eval::{ConversionConfig, ConversionConfigBuilder};

pub fn builder() -> ConversionConfigBuilder {
    ConversionConfig::builder()
        .tool_call_tags(IndicatorTags::new("<tool_call>", "</tool_call>"))
        .tool_result_tags(IndicatorTags::new("<tool_result>", "</tool_result>"))
        .tool_list_tags(IndicatorTags::new("<tool_list>", "</tool_list>"))
}

pub fn config() -> ConversionConfig {
    builder().build().expect("valid config")
}

pub fn msg(role: &str, content: &str) -> TaggedMessage {
    TaggedMessage::new(role, content)
}

pub const WEATHER_CALL: &str =
    r#"<tool_call>[{"id":"1","name":"get_weather","arguments":{"city":"Paris"}}]</tool_call>"#;

pub const WEATHER_RESULT: &str =
    "<tool_result><id>1</id><name>get_weather</name><content>22C</content></tool_result>";

pub const WEATHER_TOOLS: &str = r#"You are a weather bot. <tool_list>[{"name":"get_weather","description":"Current weather for a city","parameters":{"type":"object","properties":{"city":{"type":"string"}},"required":["city"]}}]</tool_list>"#;

/// System prompt with a tool catalog, a user question, a tool call, its result and a
/// final answer.
pub fn weather_conversation() -> Conversation {
    Conversation::new(vec![
        msg("system", WEATHER_TOOLS),
        msg("user", "What's the weather in Paris?"),
        msg("assistant", WEATHER_CALL),
        msg("user", WEATHER_RESULT),
        msg("assistant", "It is 22C in Paris."),
    ])
}

/// A small valid conversation whose user turn carries `marker`.
pub fn numbered_conversation(marker: usize) -> Conversation {
    Conversation::new(vec![
        msg("system", "sys"),
        msg("user", &format!("question {marker}")),
        msg("assistant", &format!("answer {marker}")),
    ])
}
