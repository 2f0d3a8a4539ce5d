//! Common types shared between request and response.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Case folding applied to unquoted identifiers.
///
/// Quoted identifiers are always kept exactly as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum CaseSensitivity {
    /// Keep identifiers as the parser produced them
    #[default]
    Exact,
    /// Lowercase normalization (Postgres)
    Lower,
    /// Uppercase normalization (Snowflake)
    Upper,
}

impl CaseSensitivity {
    /// Applies this folding to an unquoted identifier value.
    pub fn fold(&self, value: &str) -> String {
        match self {
            Self::Exact => value.to_string(),
            Self::Lower => value.to_lowercase(),
            Self::Upper => value.to_uppercase(),
        }
    }
}
