use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Value;

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }

    /// Exact, lowercase match only. Dataset roles such as `developer` yield `None`.
    pub fn parse(raw: &str) -> Option<Role> {
        match raw {
            "system" => Some(Role::System),
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            "tool" => Some(Role::Tool),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message of a tagged-encoding conversation, as read from a dataset.
///
/// The role is kept as the raw string so that unknown roles can be reported with their
/// original spelling.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct TaggedMessage {
    pub role: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

// Datasets exported from dataframes write absent content as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl TaggedMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Conversation {
    pub messages: Vec<TaggedMessage>,
}

impl Conversation {
    pub fn new(messages: Vec<TaggedMessage>) -> Self {
        Self { messages }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

impl From<Vec<TaggedMessage>> for Conversation {
    fn from(messages: Vec<TaggedMessage>) -> Self {
        Self::new(messages)
    }
}

/// A message in the structured encoding.
///
/// Each variant carries exactly the fields valid for its role: only `Tool` has a
/// `tool_call_id` and `name`, only `Assistant` has `tool_calls`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    System {
        content: String,
    },
    User {
        content: String,
    },
    Assistant {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tool_calls: Option<Vec<ToolCall>>,
    },
    Tool {
        tool_call_id: String,
        name: String,
        content: String,
    },
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Message::System {
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Message::User {
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>, tool_calls: Option<Vec<ToolCall>>) -> Self {
        Message::Assistant {
            content: content.into(),
            tool_calls,
        }
    }

    pub fn tool(
        tool_call_id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Message::Tool {
            tool_call_id: tool_call_id.into(),
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Message::System { .. } => Role::System,
            Message::User { .. } => Role::User,
            Message::Assistant { .. } => Role::Assistant,
            Message::Tool { .. } => Role::Tool,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Message::System { content }
            | Message::User { content }
            | Message::Assistant { content, .. }
            | Message::Tool { content, .. } => content,
        }
    }

    pub fn tool_calls(&self) -> Option<&[ToolCall]> {
        match self {
            Message::Assistant {
                tool_calls: Some(calls),
                ..
            } => Some(calls),
            _ => None,
        }
    }
}

/// A request to invoke a named function.
///
/// Serializes to the structured wire shape
/// `{"id", "type": "function", "function": {"name", "arguments"}}`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(into = "ToolCallWire", from = "ToolCallWire")]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum FunctionType {
    #[default]
    Function,
}

#[derive(Deserialize, Serialize)]
struct ToolCallWire {
    id: String,
    #[serde(rename = "type", default)]
    kind: FunctionType,
    function: FunctionCallWire,
}

#[derive(Deserialize, Serialize)]
struct FunctionCallWire {
    name: String,
    arguments: Value,
}

impl From<ToolCall> for ToolCallWire {
    fn from(call: ToolCall) -> Self {
        ToolCallWire {
            id: call.id,
            kind: FunctionType::Function,
            function: FunctionCallWire {
                name: call.name,
                arguments: call.arguments,
            },
        }
    }
}

impl From<ToolCallWire> for ToolCall {
    fn from(wire: ToolCallWire) -> Self {
        ToolCall {
            id: wire.id,
            name: wire.function.name,
            arguments: wire.function.arguments,
        }
    }
}

/// One entry of a tool catalog.
///
/// Serializes wrapped as `{"type": "function", "function": {...}}`; deserializes from
/// either the wrapped or the flat `{"name", "description", "parameters"}` shape.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(into = "ToolDefinitionWire", from = "ToolDefinitionInput")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Clone, Deserialize, Serialize)]
struct FunctionSpec {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "empty_object_schema")]
    parameters: Value,
}

fn empty_object_schema() -> Value {
    serde_json::json!({"type": "object", "properties": {}})
}

#[derive(Serialize)]
struct ToolDefinitionWire {
    #[serde(rename = "type")]
    kind: FunctionType,
    function: FunctionSpec,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ToolDefinitionInput {
    Wrapped {
        #[serde(rename = "type", default)]
        #[allow(dead_code)]
        kind: FunctionType,
        function: FunctionSpec,
    },
    Flat(FunctionSpec),
}

impl From<ToolDefinition> for ToolDefinitionWire {
    fn from(def: ToolDefinition) -> Self {
        ToolDefinitionWire {
            kind: FunctionType::Function,
            function: FunctionSpec {
                name: def.name,
                description: def.description,
                parameters: def.parameters,
            },
        }
    }
}

impl From<ToolDefinitionInput> for ToolDefinition {
    fn from(input: ToolDefinitionInput) -> Self {
        let spec = match input {
            ToolDefinitionInput::Wrapped { function, .. } => function,
            ToolDefinitionInput::Flat(spec) => spec,
        };
        ToolDefinition {
            name: spec.name,
            description: spec.description,
            parameters: spec.parameters,
        }
    }
}

/// One conversation in the target encoding.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ConvertedRecord {
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
}
