use thiserror::Error;

use crate::TagKind;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("First message should be a system message (found {})", found_label(.found))]
    MissingSystemMessage { found: Option<String> },
    #[error("Invalid role '{role}' found in message {index}")]
    InvalidRole { role: String, index: usize },
    #[error("Failed to parse {kind} block{}: {reason} (in '{fragment}')", message_suffix(.message))]
    TagParse {
        kind: TagKind,
        fragment: String,
        reason: String,
        message: Option<usize>,
    },
    #[error("Data format '{0}' is not supported for evaluation")]
    UnsupportedFormat(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Serialization/deserialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Record {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: Box<ConvertError>,
    },
}

fn found_label(found: &Option<String>) -> &str {
    found.as_deref().unwrap_or("empty conversation")
}

fn message_suffix(message: &Option<usize>) -> String {
    match message {
        Some(index) => format!(" in message {index}"),
        None => String::new(),
    }
}

impl ConvertError {
    pub fn tag_parse(kind: TagKind, fragment: impl Into<String>, reason: impl Into<String>) -> Self {
        ConvertError::TagParse {
            kind,
            fragment: fragment.into(),
            reason: reason.into(),
            message: None,
        }
    }

    /// Attributes a tag parse failure to the message at `index`. Other kinds pass through.
    pub fn at_message(self, index: usize) -> Self {
        match self {
            ConvertError::TagParse {
                kind,
                fragment,
                reason,
                message: None,
            } => ConvertError::TagParse {
                kind,
                fragment,
                reason,
                message: Some(index),
            },
            other => other,
        }
    }

    pub fn in_record(self, index: usize) -> Self {
        ConvertError::Record {
            index,
            source: Box::new(self),
        }
    }

    /// Strips any `Record` wrapper and returns the underlying error.
    pub fn root(&self) -> &ConvertError {
        match self {
            ConvertError::Record { source, .. } => source.root(),
            other => other,
        }
    }
}
