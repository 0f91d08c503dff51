//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::ValidationError;

/// Identifier of a remote conversation.
///
/// The support API hands out ids as either strings or integers; both are
/// kept as their string form so cache lookups compare like with like.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(String);

impl ChatId {
    /// Creates a ChatId, rejecting blank values.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("id"));
        }
        Ok(Self(id))
    }

    /// Reads an id from a JSON string or integer.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::String(s) => Self::new(s.clone()),
            Value::Number(n) => Self::new(n.to_string()),
            Value::Null => Err(ValidationError::empty_field("id")),
            other => Err(ValidationError::invalid_format(
                "id",
                format!("expected string or number, got {}", other),
            )),
        }
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
