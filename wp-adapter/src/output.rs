//! Result payloads returned by the adapter.

use crate::error::WpCliError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Payload of one completed WP-CLI invocation.
///
/// Callers that request `--format='json'` usually get [`WpOutput::Json`],
/// but a decode failure degrades to [`WpOutput::Text`] carrying the raw
/// output, so the type must be treated as possibly-string-possibly-structured.
#[derive(Debug, Clone, PartialEq)]
pub enum WpOutput {
    /// Decoded JSON payload.
    Json(Value),
    /// Trimmed raw stdout.
    Text(String),
}

impl WpOutput {
    /// Returns the trimmed textual form of the payload.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Json(value) => value.to_string(),
            Self::Text(text) => text,
        }
    }

    /// Returns the decoded JSON value, or a parse error for text payloads.
    pub fn into_json(self) -> Result<Value, WpCliError> {
        match self {
            Self::Json(value) => Ok(value),
            Self::Text(text) => Err(WpCliError::Parse(format!(
                "expected JSON output, got: {}",
                truncate(&text)
            ))),
        }
    }

    /// Decodes a JSON payload into `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, WpCliError> {
        let value = self.into_json()?;
        serde_json::from_value(value).map_err(|e| WpCliError::Parse(e.to_string()))
    }

    /// Returns the elements of a JSON array payload.
    pub fn into_array(self) -> Result<Vec<Value>, WpCliError> {
        match self.into_json()? {
            Value::Array(items) => Ok(items),
            other => Err(WpCliError::Parse(format!(
                "expected a JSON array, got: {}",
                truncate(&other.to_string())
            ))),
        }
    }
}

fn truncate(text: &str) -> &str {
    let mut end = text.len().min(100);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
