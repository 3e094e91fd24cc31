// src/response.rs
// Uniform response shape returned by every operation

use crate::error::DomainError;
use serde::Serialize;

/// Marker prepended to every domain-error message
pub const ERROR_PREFIX: &str = "Error: ";

/// One text segment of a response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

/// Result of a single invocation.
///
/// Serializes as `{"content":[{"type":"text","text":...}],"isError":true}`;
/// `isError` is omitted on success.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub content: Vec<TextContent>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl Response {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            content: vec![TextContent {
                kind: "text",
                text: text.into(),
            }],
            is_error: None,
        }
    }

    pub fn error(message: impl std::fmt::Display) -> Self {
        Self {
            content: vec![TextContent {
                kind: "text",
                text: format!("{}{}", ERROR_PREFIX, message),
            }],
            is_error: Some(true),
        }
    }

    /// The text of the single content segment
    pub fn text(&self) -> &str {
        self.content.first().map(|c| c.text.as_str()).unwrap_or("")
    }

    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }
}

impl From<DomainError> for Response {
    fn from(err: DomainError) -> Self {
        Response::error(err)
    }
}
