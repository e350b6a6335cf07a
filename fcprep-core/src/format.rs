use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ConvertError;

/// Target encoding for a whole dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    /// Tool calls stay embedded as tagged text in system and user turns; assistant turns
    /// are split into content plus structured tool calls for scoring.
    Tagged,
    /// Tool calls, tool results and the tool catalog live in dedicated fields.
    Structured,
}

impl DatasetFormat {
    pub const ALL: [DatasetFormat; 2] = [DatasetFormat::Tagged, DatasetFormat::Structured];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetFormat::Tagged => "tagged",
            DatasetFormat::Structured => "structured",
        }
    }
}

impl fmt::Display for DatasetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetFormat {
    type Err = ConvertError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "tagged" | "anyscale" => Ok(DatasetFormat::Tagged),
            "structured" | "openai" => Ok(DatasetFormat::Structured),
            _ => Err(ConvertError::UnsupportedFormat(raw.to_string())),
        }
    }
}
