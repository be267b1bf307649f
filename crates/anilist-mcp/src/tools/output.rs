//! The uniform result envelope returned by every tool.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, ToolError};

/// One content block of a tool result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    /// Plain text (usually pretty-printed JSON).
    Text {
        /// Text payload.
        text: String,
    },
}

/// `tools/call` result: `{content: [...], isError?: true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutput {
    /// Content blocks.
    pub content: Vec<Content>,

    /// Set on failure only.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolOutput {
    /// Successful result carrying `text`.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self { content: vec![Content::Text { text: text.into() }], is_error: false }
    }

    /// Successful result carrying `value` as pretty-printed JSON.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ToolError> {
        Ok(Self::text(serde_json::to_string_pretty(value)?))
    }

    /// Failed result. The only constructor for error envelopes.
    #[must_use]
    pub fn failure(kind: ErrorKind, message: impl std::fmt::Display) -> Self {
        let text = match kind {
            ErrorKind::Auth => message.to_string(),
            _ => format!("Error: {message}"),
        };
        Self { content: vec![Content::Text { text }], is_error: true }
    }

    /// Failed result for a tool error.
    #[must_use]
    pub fn from_error(err: &ToolError) -> Self {
        Self::failure(err.kind(), err.to_user_message())
    }

    /// Concatenated text of all content blocks.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                Content::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let out = ToolOutput::text("hello");
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!({"content": [{"type": "text", "text": "hello"}]})
        );
    }

    #[test]
    fn test_failure_shape() {
        let out = ToolOutput::failure(ErrorKind::Upstream, "Not Found.");
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!({"content": [{"type": "text", "text": "Error: Not Found."}], "isError": true})
        );
    }

    #[test]
    fn test_json_is_pretty() {
        let out = ToolOutput::json(&json!({"id": 1})).unwrap();
        assert_eq!(out.text_content(), "{\n  \"id\": 1\n}");
    }
}
